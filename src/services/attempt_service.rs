use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, RwLock};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerEntry, QuizDefinition},
        dto::{
            request::SubmitQuizRequest,
            response::{
                AttemptStatusResponse, NavigateResponse, SessionStartedResponse, SubmissionReport,
            },
        },
    },
    services::{
        attempt_session::{AttemptSession, Direction, Submission},
        grading_service::GradingService,
        quiz_service::QuizService,
        result_recorder::ResultRecorder,
        session_timer::SessionTimer,
    },
};

const TICK: Duration = Duration::from_secs(1);

/// Clamps a client-reported duration into `[0, limit]` whole seconds.
pub fn clamp_time_taken(reported: Option<f64>, limit_secs: u32) -> u32 {
    reported
        .filter(|secs| secs.is_finite())
        .map(|secs| secs.round().clamp(0.0, f64::from(limit_secs)) as u32)
        .unwrap_or(0)
}

/// Grade, hand the result to the recorder, and build the player's report.
/// The report never waits on the recorder.
fn complete_submission(
    recorder: &ResultRecorder,
    user_id: Option<&str>,
    quiz: &QuizDefinition,
    answers: &[AnswerEntry],
    time_taken_secs: u32,
) -> SubmissionReport {
    let report = GradingService::grade_attempt(quiz, answers);
    recorder.record(user_id, &quiz.id, &report, time_taken_secs);
    SubmissionReport::new(&quiz.id, report, time_taken_secs)
}

struct Completion {
    report: SubmissionReport,
    finished_at: DateTime<Utc>,
}

pub struct AttemptHandle {
    attempt_id: String,
    user_id: Option<String>,
    quiz: QuizDefinition,
    timer: SessionTimer,
    /// Set once by whichever of submit and expiry ends the attempt.
    completion: watch::Sender<Option<Completion>>,
}

impl AttemptHandle {
    async fn finish(&self, recorder: &ResultRecorder, submission: Submission) -> SubmissionReport {
        let report = complete_submission(
            recorder,
            self.user_id.as_deref(),
            &self.quiz,
            &submission.answers,
            submission.time_taken_secs,
        );
        self.completion.send_replace(Some(Completion {
            report: report.clone(),
            finished_at: Utc::now(),
        }));
        report
    }

    /// Waits for the report of an attempt that has left `Running`. The
    /// session turns terminal before the report is stored, so a caller can
    /// arrive in between and must not see a terminal status without it.
    async fn report(&self) -> Option<SubmissionReport> {
        let mut completion = self.completion.subscribe();
        let report = match completion.wait_for(Option::is_some).await {
            Ok(done) => done.as_ref().map(|c| c.report.clone()),
            Err(_) => None,
        };
        report
    }

    async fn status(&self) -> AttemptStatusResponse {
        let snapshot = self.timer.snapshot().await;
        let report = if snapshot.status.is_terminal() {
            self.report().await
        } else {
            None
        };

        AttemptStatusResponse {
            attempt_id: self.attempt_id.clone(),
            quiz_id: self.quiz.id.clone(),
            status: snapshot.status,
            remaining_seconds: snapshot.remaining_secs,
            current_index: snapshot.current_index,
            report,
        }
    }

    fn finished_before(&self, cutoff: DateTime<Utc>) -> bool {
        self.completion
            .borrow()
            .as_ref()
            .is_some_and(|c| c.finished_at <= cutoff)
    }
}

pub struct AttemptService {
    quiz_service: Arc<QuizService>,
    recorder: Arc<ResultRecorder>,
    attempts: RwLock<HashMap<String, Arc<AttemptHandle>>>,
    retention: chrono::Duration,
}

impl AttemptService {
    pub fn new(
        quiz_service: Arc<QuizService>,
        recorder: Arc<ResultRecorder>,
        retention_secs: i64,
    ) -> Self {
        Self {
            quiz_service,
            recorder,
            attempts: RwLock::new(HashMap::new()),
            retention: chrono::Duration::seconds(retention_secs.max(0)),
        }
    }

    /// Stateless submit: the client kept the clock and reports the time spent.
    pub async fn submit(
        &self,
        user_id: Option<&str>,
        request: SubmitQuizRequest,
    ) -> AppResult<SubmissionReport> {
        request.validate()?;
        let quiz_id = request
            .quiz_id
            .as_deref()
            .ok_or_else(|| AppError::ValidationError("quizId is required".to_string()))?;

        let quiz = self.quiz_service.fetch_quiz(Some(quiz_id)).await?;
        let answers: Vec<AnswerEntry> = request.answers.into_iter().map(AnswerEntry::from).collect();
        let time_taken = clamp_time_taken(request.time_taken, self.quiz_service.time_limit_secs());

        Ok(complete_submission(
            &self.recorder,
            user_id,
            &quiz,
            &answers,
            time_taken,
        ))
    }

    /// Starts a server-timed attempt. On expiry the captured answers are
    /// submitted through the same path as an explicit submit.
    pub async fn start_session(
        &self,
        user_id: Option<&str>,
        quiz_id: Option<&str>,
    ) -> AppResult<SessionStartedResponse> {
        self.prune_finished().await;

        let quiz = self.quiz_service.fetch_quiz(quiz_id).await?;
        let presented = self.quiz_service.present(&quiz);
        let order = presented.questions.iter().map(|q| q.id.clone()).collect();
        let session = AttemptSession::new(&quiz.id, order, presented.time_limit_seconds);

        let attempt_id = Uuid::new_v4().to_string();
        let handle = Arc::new(AttemptHandle {
            attempt_id: attempt_id.clone(),
            user_id: user_id.map(str::to_string),
            quiz,
            timer: SessionTimer::start(session, TICK),
            completion: watch::channel(None).0,
        });

        if let Some(expired) = handle.timer.take_expired().await {
            let handle = Arc::clone(&handle);
            let recorder = Arc::clone(&self.recorder);
            tokio::spawn(async move {
                if let Ok(submission) = expired.await {
                    handle.finish(&recorder, submission).await;
                }
            });
        }

        self.attempts
            .write()
            .await
            .insert(attempt_id.clone(), handle);

        log::info!("Started attempt {} on quiz '{}'", attempt_id, presented.quiz_id);
        Ok(SessionStartedResponse {
            attempt_id,
            quiz: presented,
        })
    }

    pub async fn capture_answer(
        &self,
        attempt_id: &str,
        question_id: &str,
        answers: Vec<String>,
    ) -> AppResult<bool> {
        let handle = self.handle(attempt_id).await?;
        Ok(handle.timer.capture_answer(question_id, answers).await)
    }

    pub async fn navigate(&self, attempt_id: &str, direction: Direction) -> AppResult<NavigateResponse> {
        let handle = self.handle(attempt_id).await?;
        let accepted = handle.timer.navigate(direction).await;
        let snapshot = handle.timer.snapshot().await;
        Ok(NavigateResponse {
            accepted,
            current_index: snapshot.current_index,
        })
    }

    /// Explicit submit of a server-timed attempt. Submitting an attempt that
    /// already ended changes nothing and returns the first report once it
    /// is available.
    pub async fn submit_session(&self, attempt_id: &str) -> AppResult<AttemptStatusResponse> {
        let handle = self.handle(attempt_id).await?;
        match handle.timer.submit().await {
            Some(submission) => {
                handle.finish(&self.recorder, submission).await;
            }
            None => log::debug!("Ignoring repeated submit for attempt {}", attempt_id),
        }
        Ok(handle.status().await)
    }

    pub async fn status(&self, attempt_id: &str) -> AppResult<AttemptStatusResponse> {
        let handle = self.handle(attempt_id).await?;
        Ok(handle.status().await)
    }

    async fn handle(&self, attempt_id: &str) -> AppResult<Arc<AttemptHandle>> {
        self.attempts
            .read()
            .await
            .get(attempt_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", attempt_id)))
    }

    async fn prune_finished(&self) {
        let cutoff = Utc::now() - self.retention;
        let stale: Vec<String> = self
            .attempts
            .read()
            .await
            .iter()
            .filter(|(_, handle)| handle.finished_before(cutoff))
            .map(|(attempt_id, _)| attempt_id.clone())
            .collect();
        if stale.is_empty() {
            return;
        }

        let mut attempts = self.attempts.write().await;
        for attempt_id in &stale {
            attempts.remove(attempt_id);
        }
        log::debug!("Pruned {} finished attempts", stale.len());
    }
}
