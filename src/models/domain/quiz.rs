use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::Question;

/// Stored quiz document. Questions live in their own collection and are
/// referenced by id in presentation order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub question_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: &str,
        question_ids: Vec<String>,
        created_by_user_id: Option<&str>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            question_ids,
            created_by_user_id: created_by_user_id.map(str::to_string),
            created_at: Some(Utc::now()),
        }
    }
}

/// A quiz with its questions resolved, in canonical stored order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl QuizDefinition {
    /// Enforces a non-empty question list with unique question ids.
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        questions: Vec<Question>,
    ) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Quiz '{}' has no questions",
                id
            )));
        }

        let mut seen = HashSet::with_capacity(questions.len());
        if let Some(duplicate) = questions.iter().find(|q| !seen.insert(q.id.as_str())) {
            return Err(AppError::ValidationError(format!(
                "Question '{}' appears twice in quiz '{}'",
                duplicate.id, id
            )));
        }

        Ok(QuizDefinition {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            questions,
        })
    }

    /// Resolves a stored quiz against its fetched questions. The questions may
    /// arrive in any order; a missing reference is reported as not found.
    pub fn resolve(quiz: &Quiz, mut questions: Vec<Question>) -> AppResult<Self> {
        let mut ordered = Vec::with_capacity(quiz.question_ids.len());
        for question_id in &quiz.question_ids {
            let position = questions
                .iter()
                .position(|q| &q.id == question_id)
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Question '{}' referenced by quiz '{}' not found",
                        question_id, quiz.id
                    ))
                })?;
            ordered.push(questions.swap_remove(position));
        }

        Self::new(&quiz.id, &quiz.title, &quiz.description, ordered)
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.question(question_id).is_some()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }
}
