use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Question, Quiz},
};

/// Quiz and question storage. Questions are written before any quiz that
/// references them, so readers never see a dangling reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_quiz(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn find_latest_quiz(&self) -> AppResult<Option<Quiz>>;
    async fn find_questions(&self, ids: &[String]) -> AppResult<Vec<Question>>;
    async fn create_question(&self, question: Question) -> AppResult<Question>;
    async fn create_quiz(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn ping(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    db: Database,
    questions: Collection<Question>,
    quizzes: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            questions: db.questions(),
            quizzes: db.quizzes(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions and quizzes collections");

        let question_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_created_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at".to_string())
                    .build(),
            )
            .build();

        self.questions.create_index(question_id_index).await?;
        self.quizzes.create_index(quiz_id_index).await?;
        self.quizzes.create_index(quiz_created_index).await?;

        log::info!("Successfully created indexes for questions and quizzes collections");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_quiz(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.quizzes.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_latest_quiz(&self) -> AppResult<Option<Quiz>> {
        let quiz = self
            .quizzes
            .find_one(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(quiz)
    }

    async fn find_questions(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        let questions = self
            .questions
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn create_question(&self, question: Question) -> AppResult<Question> {
        self.questions.insert_one(&question).await?;
        Ok(question)
    }

    async fn create_quiz(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}
