use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::services::attempt_session::{AttemptSession, Direction, SessionStatus, Submission};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub remaining_secs: u32,
    pub current_index: usize,
}

/// Drives one [`AttemptSession`] with a recurring tick on its own task.
///
/// Whichever of submit and expiry happens first ends the session; the ticker
/// is stopped exactly once. Expiry is delivered through a one-shot channel
/// whose receiver can be taken a single time.
pub struct SessionTimer {
    session: Arc<Mutex<AttemptSession>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    expired: Mutex<Option<oneshot::Receiver<Submission>>>,
}

impl SessionTimer {
    /// Starts the session and its countdown. Must be called inside a tokio runtime.
    pub fn start(mut session: AttemptSession, tick: Duration) -> Self {
        session.start();
        let session = Arc::new(Mutex::new(session));
        let (expired_tx, expired_rx) = oneshot::channel();

        let ticker = tokio::spawn(run_ticker(Arc::clone(&session), tick, expired_tx));

        SessionTimer {
            session,
            ticker: Mutex::new(Some(ticker)),
            expired: Mutex::new(Some(expired_rx)),
        }
    }

    pub async fn capture_answer(&self, question_id: &str, raw: Vec<String>) -> bool {
        self.session.lock().await.capture_answer(question_id, raw)
    }

    pub async fn navigate(&self, direction: Direction) -> bool {
        self.session.lock().await.navigate(direction)
    }

    /// Explicit submit. Returns `None` if the session already ended, which
    /// covers a double submit and a submit racing with expiry.
    pub async fn submit(&self) -> Option<Submission> {
        let submission = self.session.lock().await.submit();
        if submission.is_some() {
            self.cancel().await;
        }
        submission
    }

    pub async fn cancel(&self) {
        if let Some(ticker) = self.ticker.lock().await.take() {
            ticker.abort();
        }
    }

    pub async fn take_expired(&self) -> Option<oneshot::Receiver<Submission>> {
        self.expired.lock().await.take()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            status: session.status(),
            remaining_secs: session.remaining_secs(),
            current_index: session.current_index(),
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.get_mut().take() {
            ticker.abort();
        }
    }
}

async fn run_ticker(
    session: Arc<Mutex<AttemptSession>>,
    tick: Duration,
    expired: oneshot::Sender<Submission>,
) {
    let mut interval = time::interval_at(Instant::now() + tick, tick);
    loop {
        interval.tick().await;

        let mut guard = session.lock().await;
        let forced = guard.tick();
        if let Some(submission) = forced {
            drop(guard);
            log::info!(
                "Attempt on quiz '{}' expired after {}s, forcing submission",
                submission.quiz_id,
                submission.time_taken_secs
            );
            if expired.send(submission).is_err() {
                log::warn!("Expiry fired with nobody listening for the forced submission");
            }
            return;
        }
        if guard.status() != SessionStatus::Running {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::attempt_session::SubmitTrigger;

    fn session(budget_secs: u32) -> AttemptSession {
        AttemptSession::new("quiz-1", vec!["q0".to_string(), "q1".to_string()], budget_secs)
    }

    #[tokio::test(start_paused = true)]
    async fn manual_submit_after_45_seconds_reports_45() {
        let timer = SessionTimer::start(session(120), Duration::from_secs(1));

        time::sleep(Duration::from_millis(45_500)).await;

        let submission = timer.submit().await.expect("session still running");
        assert_eq!(submission.time_taken_secs, 45);
        assert_eq!(submission.trigger, SubmitTrigger::Manual);
        assert_eq!(timer.snapshot().await.status, SessionStatus::Submitted);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_forces_submission_with_full_budget() {
        let timer = SessionTimer::start(session(120), Duration::from_secs(1));
        assert!(timer.capture_answer("q0", vec!["c".to_string()]).await);

        let expired = timer.take_expired().await.expect("receiver available once");
        let submission = expired.await.expect("expiry fires");

        assert_eq!(submission.time_taken_secs, 120);
        assert_eq!(submission.trigger, SubmitTrigger::Expired);
        assert_eq!(submission.answers[0].answers, vec!["c"]);
        assert_eq!(timer.snapshot().await.status, SessionStatus::Expired);
        assert!(timer.submit().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_receiver_is_handed_out_once() {
        let timer = SessionTimer::start(session(10), Duration::from_secs(1));
        assert!(timer.take_expired().await.is_some());
        assert!(timer.take_expired().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_submit_cancels_expiry() {
        let timer = SessionTimer::start(session(5), Duration::from_secs(1));
        let expired = timer.take_expired().await.unwrap();

        assert!(timer.submit().await.is_some());
        assert!(timer.submit().await.is_none());

        // The ticker was aborted, so the sender is dropped without firing.
        assert!(expired.await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn answers_are_refused_after_expiry() {
        let timer = SessionTimer::start(session(3), Duration::from_secs(1));
        let expired = timer.take_expired().await.unwrap();
        expired.await.unwrap();

        assert!(!timer.capture_answer("q0", vec!["a".to_string()]).await);
        assert!(!timer.navigate(Direction::Next).await);
    }
}
