use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoResultRepository, QuizRepository, ResultRepository},
    services::{
        attempt_service::AttemptService, quiz_service::QuizService,
        result_recorder::ResultRecorder,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub recorder: Arc<ResultRecorder>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let result_repository = Arc::new(MongoResultRepository::new(&db));
        result_repository.ensure_indexes().await?;

        Ok(Self::from_repositories(
            quiz_repository,
            result_repository,
            config,
        ))
    }

    /// Wires the services over any storage backend.
    pub fn from_repositories(
        quiz_repository: Arc<dyn QuizRepository>,
        result_repository: Arc<dyn ResultRepository>,
        config: Config,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            config.quiz_time_limit_secs,
        ));
        let recorder = Arc::new(ResultRecorder::new(result_repository));
        let attempt_service = Arc::new(AttemptService::new(
            Arc::clone(&quiz_service),
            Arc::clone(&recorder),
            config.attempt_retention_secs,
        ));
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Self {
            quiz_service,
            attempt_service,
            recorder,
            jwt_service,
            config: Arc::new(config),
        }
    }
}
