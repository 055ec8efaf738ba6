use std::collections::HashMap;

use crate::models::domain::grade_report::percentage;
use crate::models::domain::{AnswerEntry, GradeReport, GradingDetail, Question, QuizDefinition};
use crate::services::answer_normalizer::normalize;

/// Pure grading: no storage access, no shared state, safe to call concurrently.
pub struct GradingService;

impl GradingService {
    /// Grade a submission against a quiz.
    ///
    /// Entries for questions outside the quiz are dropped; when one question
    /// is answered twice the later entry wins. Details follow the quiz's
    /// stored order and cover every question, answered or not.
    pub fn grade_attempt(quiz: &QuizDefinition, submitted: &[AnswerEntry]) -> GradeReport {
        let answers = Self::collect_answers(quiz, submitted);
        Self::grade(quiz, &answers)
    }

    pub fn grade(quiz: &QuizDefinition, answers: &HashMap<&str, &[String]>) -> GradeReport {
        let details: Vec<GradingDetail> = quiz
            .questions
            .iter()
            .map(|question| Self::grade_question(question, answers.get(question.id.as_str()).copied()))
            .collect();

        let score = details.iter().filter(|d| d.correct).count() as u32;
        let total = quiz.total() as u32;

        GradeReport {
            score,
            total,
            percentage: percentage(score, total),
            details,
        }
    }

    /// Grade one question. `None` means the player never answered it.
    pub fn grade_question(question: &Question, raw: Option<&[String]>) -> GradingDetail {
        let expected = normalize(question.question_type, &question.answer);
        let given = normalize(question.question_type, raw.unwrap_or_default());

        GradingDetail {
            question_id: question.id.clone(),
            correct: given == expected,
            correct_answer: question.answer.clone(),
            user_answer: given.tokens(),
            prompt: question.prompt.clone(),
        }
    }

    fn collect_answers<'a>(
        quiz: &QuizDefinition,
        submitted: &'a [AnswerEntry],
    ) -> HashMap<&'a str, &'a [String]> {
        let mut answers = HashMap::with_capacity(submitted.len());
        for entry in submitted {
            if !quiz.contains(&entry.question_id) {
                log::debug!(
                    "Dropping answer for question '{}' not in quiz '{}'",
                    entry.question_id,
                    quiz.id
                );
                continue;
            }
            answers.insert(entry.question_id.as_str(), entry.answers.as_slice());
        }
        answers
    }
}
