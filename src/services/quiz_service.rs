use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz, QuizDefinition},
        dto::{
            request::{CreateQuestionRequest, CreateQuizRequest},
            response::StartAttemptResponse,
        },
    },
    repositories::QuizRepository,
    services::randomizer::shuffle_questions,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    time_limit_secs: u32,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, time_limit_secs: u32) -> Self {
        Self {
            repository,
            time_limit_secs,
        }
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Loads a quiz with its questions resolved. Without an id the most
    /// recently created quiz is served.
    pub async fn fetch_quiz(&self, quiz_id: Option<&str>) -> AppResult<QuizDefinition> {
        let quiz = match quiz_id {
            Some(id) => self
                .repository
                .find_quiz(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?,
            None => self
                .repository
                .find_latest_quiz()
                .await?
                .ok_or_else(|| AppError::NotFound("No quiz available".to_string()))?,
        };

        let questions = self.repository.find_questions(&quiz.question_ids).await?;
        QuizDefinition::resolve(&quiz, questions)
    }

    /// Hands out a freshly shuffled question list with answers stripped.
    pub async fn start_attempt(&self, quiz_id: Option<&str>) -> AppResult<StartAttemptResponse> {
        let quiz = self.fetch_quiz(quiz_id).await?;
        Ok(self.present(&quiz))
    }

    pub fn present(&self, quiz: &QuizDefinition) -> StartAttemptResponse {
        let questions = shuffle_questions(&quiz.questions, &mut rand::thread_rng());
        StartAttemptResponse {
            quiz_id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            time_limit_seconds: self.time_limit_secs,
            questions,
        }
    }

    /// Validates every question up front, writes the questions one by one,
    /// and only then writes the quiz document that references them.
    pub async fn create_quiz(
        &self,
        request: CreateQuizRequest,
        created_by_user_id: Option<&str>,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let questions: Vec<Question> = request
            .questions
            .into_iter()
            .map(CreateQuestionRequest::into_question)
            .collect();
        for question in &questions {
            question.validate()?;
        }

        let mut question_ids = Vec::with_capacity(questions.len());
        for question in questions {
            let saved = self.repository.create_question(question).await?;
            question_ids.push(saved.id);
        }

        let quiz = Quiz::new(
            &request.title,
            &request.description,
            question_ids,
            created_by_user_id,
        );
        let quiz = self.repository.create_quiz(quiz).await?;

        log::info!(
            "Created quiz '{}' ({}) with {} questions",
            quiz.title,
            quiz.id,
            quiz.question_ids.len()
        );
        Ok(quiz)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::Sequence;

    use super::*;
    use crate::repositories::quiz_repository::MockQuizRepository;
    use crate::test_utils::fixtures;

    #[tokio::test]
    async fn fetch_quiz_resolves_questions_in_stored_order() {
        let (quiz, questions) = fixtures::stored_sample_quiz();
        let expected_ids = quiz.question_ids.clone();

        let mut repository = MockQuizRepository::new();
        let stored = quiz.clone();
        repository
            .expect_find_quiz()
            .withf(|id| id == "quiz-sample")
            .returning(move |_| Ok(Some(stored.clone())));
        let mut reversed = questions.clone();
        reversed.reverse();
        repository
            .expect_find_questions()
            .returning(move |_| Ok(reversed.clone()));

        let service = QuizService::new(Arc::new(repository), 120);
        let definition = service.fetch_quiz(Some("quiz-sample")).await.unwrap();

        let ids: Vec<_> = definition.questions.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids, expected_ids);
    }

    #[tokio::test]
    async fn fetch_quiz_without_id_serves_latest() {
        let (quiz, questions) = fixtures::stored_sample_quiz();

        let mut repository = MockQuizRepository::new();
        repository.expect_find_quiz().never();
        repository
            .expect_find_latest_quiz()
            .times(1)
            .returning(move || Ok(Some(quiz.clone())));
        repository
            .expect_find_questions()
            .returning(move |_| Ok(questions.clone()));

        let service = QuizService::new(Arc::new(repository), 120);
        let definition = service.fetch_quiz(None).await.unwrap();
        assert_eq!(definition.id, "quiz-sample");
    }

    #[tokio::test]
    async fn fetch_unknown_quiz_is_not_found() {
        let mut repository = MockQuizRepository::new();
        repository.expect_find_quiz().returning(|_| Ok(None));
        repository.expect_find_questions().never();

        let service = QuizService::new(Arc::new(repository), 120);
        let result = service.fetch_quiz(Some("missing")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_quiz_with_missing_question_is_not_found() {
        let (quiz, mut questions) = fixtures::stored_sample_quiz();
        questions.pop();

        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_quiz()
            .returning(move |_| Ok(Some(quiz.clone())));
        repository
            .expect_find_questions()
            .returning(move |_| Ok(questions.clone()));

        let service = QuizService::new(Arc::new(repository), 120);
        assert!(matches!(
            service.fetch_quiz(Some("quiz-sample")).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn start_attempt_strips_answers_and_keeps_identities() {
        let (quiz, questions) = fixtures::stored_sample_quiz();
        let mut expected: Vec<_> = quiz.question_ids.clone();
        expected.sort();

        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_quiz()
            .returning(move |_| Ok(Some(quiz.clone())));
        repository
            .expect_find_questions()
            .returning(move |_| Ok(questions.clone()));

        let service = QuizService::new(Arc::new(repository), 90);
        let started = service.start_attempt(Some("quiz-sample")).await.unwrap();

        let mut ids: Vec<_> = started.questions.iter().map(|q| q.id.clone()).collect();
        ids.sort();
        assert_eq!(ids, expected);
        assert_eq!(started.time_limit_seconds, 90);

        let json = serde_json::to_string(&started).unwrap();
        assert!(!json.contains("\"answer\""));
    }

    #[tokio::test]
    async fn create_quiz_writes_questions_before_quiz() {
        let mut repository = MockQuizRepository::new();
        let mut seq = Sequence::new();
        let written = Arc::new(Mutex::new(Vec::<String>::new()));

        let record = Arc::clone(&written);
        repository
            .expect_create_question()
            .times(2)
            .in_sequence(&mut seq)
            .returning(move |question| {
                record.lock().unwrap().push(question.id.clone());
                Ok(question)
            });
        let check = Arc::clone(&written);
        repository
            .expect_create_quiz()
            .times(1)
            .in_sequence(&mut seq)
            .withf(move |quiz| *check.lock().unwrap() == quiz.question_ids)
            .returning(Ok);

        let service = QuizService::new(Arc::new(repository), 120);
        let quiz = service
            .create_quiz(fixtures::create_quiz_request(), Some("admin-1"))
            .await
            .expect("quiz is created");

        assert_eq!(quiz.question_ids.len(), 2);
        assert_eq!(quiz.created_by_user_id.as_deref(), Some("admin-1"));
    }

    #[tokio::test]
    async fn create_quiz_with_invalid_question_writes_nothing() {
        let mut repository = MockQuizRepository::new();
        repository.expect_create_question().never();
        repository.expect_create_quiz().never();

        let mut request = fixtures::create_quiz_request();
        request.questions[0].answer = vec!["z".to_string()];

        let service = QuizService::new(Arc::new(repository), 120);
        let result = service.create_quiz(request, None).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn create_quiz_rejects_question_without_answer_key() {
        let mut repository = MockQuizRepository::new();
        repository.expect_create_question().never();
        repository.expect_create_quiz().never();

        let mut request = fixtures::create_quiz_request();
        request.questions[0].answer = vec![];

        let service = QuizService::new(Arc::new(repository), 120);
        let result = service.create_quiz(request, None).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
