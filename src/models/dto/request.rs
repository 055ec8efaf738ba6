use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::domain::{AnswerEntry, Question, QuestionType};
use crate::services::attempt_session::Direction;

/// Question ids arrive as JSON strings or, from older clients, as numbers.
fn question_id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!("invalid question id: {}", other))),
    }
}

/// Anything that is not an array of strings degrades to "no answer".
fn lenient_answers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let answers = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(token) => Some(token),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(answers)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptQuery {
    pub quiz_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmittedAnswer {
    #[serde(deserialize_with = "question_id_from_json")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_answers")]
    pub answers: Vec<String>,
}

impl From<SubmittedAnswer> for AnswerEntry {
    fn from(answer: SubmittedAnswer) -> Self {
        AnswerEntry {
            question_id: answer.id,
            answers: answer.answers,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[validate(required(message = "quizId is required"))]
    pub quiz_id: Option<String>,

    #[validate(length(max = 500))]
    pub answers: Vec<SubmittedAnswer>,

    /// Seconds the client reports having spent; clamped server-side.
    #[serde(default)]
    pub time_taken: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    #[serde(default)]
    #[validate(length(max = 26))]
    pub options: Vec<String>,

    #[serde(default)]
    pub answer: Vec<String>,
}

impl CreateQuestionRequest {
    pub fn into_question(self) -> Question {
        Question::new(&self.text, self.question_type, self.options, self.answer)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,

    #[validate(length(min = 1, max = 200), nested)]
    pub questions: Vec<CreateQuestionRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub quiz_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureAnswerRequest {
    #[serde(deserialize_with = "question_id_from_json")]
    pub question_id: String,
    #[serde(default, deserialize_with = "lenient_answers")]
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavigateRequest {
    pub direction: Direction,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResultsQuery {
    pub quiz_id: Option<String>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl ResultsQuery {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }
}
