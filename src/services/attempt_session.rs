use serde::{Deserialize, Serialize};

use crate::models::domain::AnswerEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Expired,
    Submitted,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Expired | SessionStatus::Submitted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitTrigger {
    Manual,
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

/// Snapshot handed to the grading path when an attempt ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub quiz_id: String,
    pub answers: Vec<AnswerEntry>,
    pub time_taken_secs: u32,
    pub trigger: SubmitTrigger,
}

/// One play-through of a quiz. Counts down in whole seconds, one `tick` per
/// second, and leaves `Running` exactly once, by submit or by expiry.
#[derive(Clone, Debug)]
pub struct AttemptSession {
    quiz_id: String,
    presented: Vec<String>,
    answers: Vec<Option<Vec<String>>>,
    current: usize,
    budget_secs: u32,
    remaining_secs: u32,
    status: SessionStatus,
}

impl AttemptSession {
    pub fn new(quiz_id: &str, presented: Vec<String>, budget_secs: u32) -> Self {
        let answers = vec![None; presented.len()];
        AttemptSession {
            quiz_id: quiz_id.to_string(),
            presented,
            answers,
            current: 0,
            budget_secs,
            remaining_secs: budget_secs,
            status: SessionStatus::Idle,
        }
    }

    pub fn start(&mut self) -> bool {
        if self.status != SessionStatus::Idle {
            return false;
        }
        self.status = SessionStatus::Running;
        true
    }

    /// Stores the raw answer for a presented question. Refused once the
    /// attempt is no longer running or the id was never presented.
    pub fn capture_answer(&mut self, question_id: &str, raw: Vec<String>) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        match self.presented.iter().position(|id| id == question_id) {
            Some(index) => {
                self.answers[index] = Some(raw);
                true
            }
            None => false,
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        match direction {
            Direction::Next if self.current + 1 < self.presented.len() => self.current += 1,
            Direction::Previous if self.current > 0 => self.current -= 1,
            _ => return false,
        }
        true
    }

    /// Advances the clock by one second. Returns the forced submission when
    /// this tick exhausts the budget.
    pub fn tick(&mut self) -> Option<Submission> {
        if self.status != SessionStatus::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.finish(SubmitTrigger::Expired));
        }
        None
    }

    /// Explicit submit. `None` when the attempt already ended.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.status != SessionStatus::Running {
            return None;
        }
        Some(self.finish(SubmitTrigger::Manual))
    }

    pub fn time_taken_secs(&self) -> u32 {
        self.budget_secs.saturating_sub(self.remaining_secs)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    fn finish(&mut self, trigger: SubmitTrigger) -> Submission {
        self.status = match trigger {
            SubmitTrigger::Manual => SessionStatus::Submitted,
            SubmitTrigger::Expired => SessionStatus::Expired,
        };

        let answers = self
            .presented
            .iter()
            .zip(&self.answers)
            .map(|(question_id, raw)| AnswerEntry {
                question_id: question_id.clone(),
                answers: raw.clone().unwrap_or_default(),
            })
            .collect();

        Submission {
            quiz_id: self.quiz_id.clone(),
            answers,
            time_taken_secs: self.time_taken_secs(),
            trigger,
        }
    }
}
