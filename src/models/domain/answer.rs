use serde::{Deserialize, Serialize};

/// Raw answer payload captured for one question, before normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerEntry {
    pub question_id: String,
    pub answers: Vec<String>,
}

impl AnswerEntry {
    pub fn new(question_id: &str, answers: &[&str]) -> Self {
        AnswerEntry {
            question_id: question_id.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }
}
