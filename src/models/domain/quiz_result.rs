use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted outcome of one completed attempt. Written once, never updated.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub time_taken_secs: u32,
    pub submitted_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn new(
        user_id: &str,
        quiz_id: &str,
        score: u32,
        total: u32,
        percentage: f64,
        time_taken_secs: u32,
    ) -> Self {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score,
            total,
            percentage,
            time_taken_secs,
            submitted_at: Utc::now(),
        }
    }
}
