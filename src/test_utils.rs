#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Question, QuestionType, Quiz, QuizDefinition};
    use crate::models::dto::request::{CreateQuestionRequest, CreateQuizRequest};

    /// Creates a question with a fixed id
    pub fn question(
        id: &str,
        question_type: QuestionType,
        options: &[&str],
        answer: &[&str],
    ) -> Question {
        let mut question = Question::new(
            &format!("Question {}", id),
            question_type,
            options.iter().map(|o| o.to_string()).collect(),
            answer.iter().map(|a| a.to_string()).collect(),
        );
        question.id = id.to_string();
        question
    }

    /// Capital (single choice), sum (short answer) and primes (multi-select)
    pub fn sample_questions() -> Vec<Question> {
        vec![
            question(
                "0",
                QuestionType::SingleChoice,
                &["Madrid", "Berlin", "Paris", "Rome"],
                &["c"],
            ),
            question("1", QuestionType::ShortAnswer, &[], &["4"]),
            question(
                "2",
                QuestionType::MultiSelect,
                &["2", "3", "4", "5"],
                &["a", "b", "d"],
            ),
        ]
    }

    pub fn stored_sample_quiz() -> (Quiz, Vec<Question>) {
        let questions = sample_questions();
        let mut quiz = Quiz::new(
            "Sample",
            "Three question types",
            questions.iter().map(|q| q.id.clone()).collect(),
            None,
        );
        quiz.id = "quiz-sample".to_string();
        (quiz, questions)
    }

    pub fn sample_definition() -> QuizDefinition {
        let (quiz, questions) = stored_sample_quiz();
        QuizDefinition::resolve(&quiz, questions).expect("sample quiz is valid")
    }

    pub fn create_quiz_request() -> CreateQuizRequest {
        CreateQuizRequest {
            title: "Basics".to_string(),
            description: "Two questions".to_string(),
            questions: vec![
                CreateQuestionRequest {
                    text: "What is the capital of France?".to_string(),
                    question_type: QuestionType::SingleChoice,
                    options: vec!["Madrid".into(), "Berlin".into(), "Paris".into(), "Rome".into()],
                    answer: vec!["c".to_string()],
                },
                CreateQuestionRequest {
                    text: "What is 2 + 2?".to_string(),
                    question_type: QuestionType::ShortAnswer,
                    options: vec![],
                    answer: vec!["4".to_string()],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_definition() {
        let definition = sample_definition();
        assert_eq!(definition.id, "quiz-sample");
        assert_eq!(definition.total(), 3);
    }

    #[test]
    fn test_fixtures_questions_are_valid() {
        for question in sample_questions() {
            assert!(question.validate().is_ok(), "{} should be valid", question.id);
        }
    }
}
