use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuestionType},
        dto::request::{CreateQuestionRequest, CreateQuizRequest},
    },
    services::quiz_service::QuizService,
};

fn question(text: &str, question_type: QuestionType, options: &[&str], answer: &[&str]) -> CreateQuestionRequest {
    CreateQuestionRequest {
        text: text.to_string(),
        question_type,
        options: options.iter().map(|o| o.to_string()).collect(),
        answer: answer.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn sample_quiz_request() -> CreateQuizRequest {
    CreateQuizRequest {
        title: "Web Basics".to_string(),
        description: "A short warm-up quiz".to_string(),
        questions: vec![
            question(
                "What is the capital of France?",
                QuestionType::SingleChoice,
                &["Madrid", "Berlin", "Paris", "Rome"],
                &["c"],
            ),
            question(
                "Which language runs in a browser?",
                QuestionType::SingleChoice,
                &["Java", "C++", "Python", "JavaScript"],
                &["d"],
            ),
            question(
                "What does HTML stand for?",
                QuestionType::SingleChoice,
                &[
                    "HyperText Machine Language",
                    "HyperText Markup Language",
                    "HighText Markdown Language",
                    "None of the above",
                ],
                &["b"],
            ),
            question(
                "What year was JavaScript launched?",
                QuestionType::SingleChoice,
                &["1996", "1995", "1994", "None of the above"],
                &["b"],
            ),
            question("What is 2 + 2?", QuestionType::ShortAnswer, &[], &["4"]),
            question(
                "Select all prime numbers.",
                QuestionType::MultiSelect,
                &["2", "3", "4", "5"],
                &["a", "b", "d"],
            ),
        ],
    }
}

/// Writes the sample quiz when the store has none yet.
pub async fn seed_sample_quiz(quiz_service: &QuizService) -> AppResult<Option<Quiz>> {
    match quiz_service.fetch_quiz(None).await {
        Ok(_) => {
            log::info!("Quiz store already populated, skipping sample quiz");
            Ok(None)
        }
        Err(AppError::NotFound(_)) => {
            let quiz = quiz_service.create_quiz(sample_quiz_request(), None).await?;
            log::info!("Seeded sample quiz {}", quiz.id);
            Ok(Some(quiz))
        }
        Err(err) => Err(err),
    }
}
