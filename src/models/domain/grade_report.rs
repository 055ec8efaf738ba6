use serde::Serialize;

/// Per-question outcome, produced fresh by every grading call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingDetail {
    #[serde(rename = "id")]
    pub question_id: String,
    pub correct: bool,
    pub correct_answer: Vec<String>,
    pub user_answer: Vec<String>,
    #[serde(rename = "question")]
    pub prompt: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub details: Vec<GradingDetail>,
}

/// `score / total * 100`, with an empty quiz scoring 0%.
pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(total) * 100.0
}
