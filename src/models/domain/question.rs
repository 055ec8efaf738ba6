use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Options are addressed by position as 'a', 'b', 'c', ... so a question can
/// carry at most one option per lowercase letter.
pub const MAX_OPTIONS: usize = 26;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum QuestionType {
    #[serde(rename = "mcq")]
    SingleChoice,
    #[serde(rename = "multi-select")]
    MultiSelect,
    #[serde(rename = "short-answer")]
    ShortAnswer,
}

impl QuestionType {
    pub fn has_options(self) -> bool {
        !matches!(self, QuestionType::ShortAnswer)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    /// Selector tokens for choice questions, the expected text for short answers.
    #[serde(default)]
    pub answer: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(
        prompt: &str,
        question_type: QuestionType,
        options: Vec<String>,
        answer: Vec<String>,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.to_string(),
            question_type,
            options,
            answer,
            created_at: Some(Utc::now()),
        }
    }

    /// Checks the cross-field invariants a stored question must hold.
    pub fn validate(&self) -> AppResult<()> {
        if self.prompt.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Question text must not be empty".to_string(),
            ));
        }

        match self.question_type {
            QuestionType::ShortAnswer => {
                if !self.options.is_empty() {
                    return Err(AppError::ValidationError(format!(
                        "Short-answer question '{}' must not have options",
                        self.prompt
                    )));
                }
                match self.answer.as_slice() {
                    [text] if !text.trim().is_empty() => {}
                    _ => {
                        return Err(AppError::ValidationError(format!(
                            "Short-answer question '{}' needs exactly one non-blank answer",
                            self.prompt
                        )))
                    }
                }
            }
            QuestionType::SingleChoice | QuestionType::MultiSelect => {
                if self.options.len() < 2 || self.options.len() > MAX_OPTIONS {
                    return Err(AppError::ValidationError(format!(
                        "Question '{}' needs between 2 and {} options",
                        self.prompt, MAX_OPTIONS
                    )));
                }
                if self.options.iter().any(|o| o.trim().is_empty()) {
                    return Err(AppError::ValidationError(format!(
                        "Question '{}' has an empty option",
                        self.prompt
                    )));
                }
                if self.question_type == QuestionType::SingleChoice && self.answer.len() != 1 {
                    return Err(AppError::ValidationError(format!(
                        "Single-choice question '{}' needs exactly one correct option",
                        self.prompt
                    )));
                }
                for (i, token) in self.answer.iter().enumerate() {
                    match option_index(token) {
                        Some(index) if index < self.options.len() => {}
                        _ => {
                            return Err(AppError::ValidationError(format!(
                                "Answer '{}' does not address an option of '{}'",
                                token, self.prompt
                            )))
                        }
                    }
                    if self.answer[..i].contains(token) {
                        return Err(AppError::ValidationError(format!(
                            "Answer '{}' is listed twice for '{}'",
                            token, self.prompt
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Selector token for the option at `index`: 0 -> "a", 1 -> "b", ...
pub fn selector_token(index: usize) -> Option<String> {
    if index >= MAX_OPTIONS {
        return None;
    }
    char::from_u32('a' as u32 + index as u32).map(|c| c.to_string())
}

/// Inverse of [`selector_token`]. Only a single lowercase letter is a token.
pub fn option_index(token: &str) -> Option<usize> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ 'a'..='z'), None) => Some(c as usize - 'a' as usize),
        _ => None,
    }
}
