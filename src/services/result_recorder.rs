use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    errors::AppResult,
    models::domain::{GradeReport, QuizResult},
    repositories::ResultRepository,
};

/// Persists completed attempts without holding up the player's report.
pub struct ResultRecorder {
    repository: Arc<dyn ResultRepository>,
}

impl ResultRecorder {
    pub fn new(repository: Arc<dyn ResultRepository>) -> Self {
        Self { repository }
    }

    /// Spawns the write and returns immediately. Anonymous attempts are not
    /// persisted and return `None`. Failures only reach the log.
    pub fn record(
        &self,
        user_id: Option<&str>,
        quiz_id: &str,
        report: &GradeReport,
        time_taken_secs: u32,
    ) -> Option<JoinHandle<()>> {
        let user_id = user_id?;
        let result = QuizResult::new(
            user_id,
            quiz_id,
            report.score,
            report.total,
            report.percentage,
            time_taken_secs,
        );
        let repository = Arc::clone(&self.repository);

        Some(tokio::spawn(async move {
            let (user_id, quiz_id) = (result.user_id.clone(), result.quiz_id.clone());
            match repository.record(result).await {
                Ok(saved) => log::info!(
                    "Recorded result {} for user '{}' on quiz '{}': {}/{}",
                    saved.id,
                    saved.user_id,
                    saved.quiz_id,
                    saved.score,
                    saved.total
                ),
                Err(err) => log::error!(
                    "Failed to record result for user '{}' on quiz '{}': {}",
                    user_id,
                    quiz_id,
                    err
                ),
            }
        }))
    }

    pub async fn results_for_user(
        &self,
        user_id: &str,
        quiz_id: Option<String>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        self.repository
            .find_by_user(user_id, quiz_id, offset, limit)
            .await
    }
}
