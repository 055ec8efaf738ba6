use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{GradeReport, GradingDetail, Question, QuestionType, QuizResult};
use crate::services::attempt_session::SessionStatus;

/// Question as shown to a player. Has no field that could carry the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        PublicQuestion {
            id: question.id.clone(),
            question: question.prompt.clone(),
            question_type: question.question_type,
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptResponse {
    pub quiz_id: String,
    pub title: String,
    pub description: String,
    pub time_limit_seconds: u32,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    pub message: String,
    pub quiz_id: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub time_taken: u32,
    pub details: Vec<GradingDetail>,
}

impl SubmissionReport {
    pub fn new(quiz_id: &str, report: GradeReport, time_taken: u32) -> Self {
        SubmissionReport {
            message: "Quiz submitted successfully".to_string(),
            quiz_id: quiz_id.to_string(),
            score: report.score,
            total: report.total,
            percentage: report.percentage,
            time_taken,
            details: report.details,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartedResponse {
    pub attempt_id: String,
    #[serde(flatten)]
    pub quiz: StartAttemptResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptureAnswerResponse {
    pub accepted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateResponse {
    pub accepted: bool,
    pub current_index: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptStatusResponse {
    pub attempt_id: String,
    pub quiz_id: String,
    pub status: SessionStatus,
    pub remaining_seconds: u32,
    pub current_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SubmissionReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCreatedResponse {
    pub message: String,
    pub quiz_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

/// One stored result as listed back to its owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub time_taken: u32,
    pub submitted_at: DateTime<Utc>,
}

impl From<QuizResult> for ResultSummary {
    fn from(result: QuizResult) -> Self {
        ResultSummary {
            id: result.id,
            user_id: result.user_id,
            quiz_id: result.quiz_id,
            score: result.score,
            total: result.total,
            percentage: result.percentage,
            time_taken: result.time_taken_secs,
            submitted_at: result.submitted_at,
        }
    }
}

pub type ResultsPage = PaginatedResponse<ResultSummary>;
