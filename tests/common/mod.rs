#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizgrade_server::{
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionType, Quiz, QuizResult},
    repositories::{QuizRepository, ResultRepository},
};

pub struct InMemoryQuizRepository {
    questions: Arc<RwLock<HashMap<String, Question>>>,
    quizzes: Arc<RwLock<Vec<Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(HashMap::new())),
            quizzes: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_quiz(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn find_latest_quiz(&self) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        // Insertion order breaks ties between equal timestamps.
        Ok(quizzes
            .iter()
            .enumerate()
            .max_by_key(|(index, q)| (q.created_at, *index))
            .map(|(_, q)| q.clone()))
    }

    async fn find_questions(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(ids.iter().filter_map(|id| questions.get(id).cloned()).collect())
    }

    async fn create_question(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        if questions.contains_key(&question.id) {
            return Err(AppError::DatabaseError(format!(
                "Duplicate question id '{}'",
                question.id
            )));
        }
        questions.insert(question.id.clone(), question.clone());
        Ok(question)
    }

    async fn create_quiz(&self, quiz: Quiz) -> AppResult<Quiz> {
        let questions = self.questions.read().await;
        if let Some(missing) = quiz.question_ids.iter().find(|id| !questions.contains_key(*id)) {
            return Err(AppError::DatabaseError(format!(
                "Quiz references unknown question '{}'",
                missing
            )));
        }

        let mut quizzes = self.quizzes.write().await;
        if quizzes.iter().any(|q| q.id == quiz.id) {
            return Err(AppError::DatabaseError(format!(
                "Duplicate quiz id '{}'",
                quiz.id
            )));
        }
        quizzes.push(quiz.clone());
        Ok(quiz)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryResultRepository {
    results: Arc<RwLock<Vec<QuizResult>>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn all(&self) -> Vec<QuizResult> {
        self.results.read().await.clone()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn record(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        quiz_id: Option<String>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| quiz_id.as_deref().map_or(true, |id| r.quiz_id == id))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }
}

pub fn question(id: &str, question_type: QuestionType, options: &[&str], answer: &[&str]) -> Question {
    let mut question = Question::new(
        &format!("Question {}", id),
        question_type,
        options.iter().map(|o| o.to_string()).collect(),
        answer.iter().map(|a| a.to_string()).collect(),
    );
    question.id = id.to_string();
    question
}

pub fn make_quiz(id: &str, question_ids: &[&str]) -> Quiz {
    let mut quiz = Quiz::new(
        &format!("Quiz {}", id),
        "",
        question_ids.iter().map(|q| q.to_string()).collect(),
        None,
    );
    quiz.id = id.to_string();
    quiz
}

/// Stores a two-question quiz: "0" single choice with answer `c`, "1" short
/// answer with answer `4`.
pub async fn seed_basic_quiz(repo: &InMemoryQuizRepository, quiz_id: &str) {
    repo.create_question(question(
        "0",
        QuestionType::SingleChoice,
        &["Madrid", "Berlin", "Paris", "Rome"],
        &["c"],
    ))
    .await
    .expect("store question 0");
    repo.create_question(question("1", QuestionType::ShortAnswer, &[], &["4"]))
        .await
        .expect("store question 1");
    repo.create_quiz(make_quiz(quiz_id, &["0", "1"]))
        .await
        .expect("store quiz");
}

pub fn make_result(user_id: &str, quiz_id: &str, score: u32) -> QuizResult {
    QuizResult::new(user_id, quiz_id, score, 2, f64::from(score) * 50.0, 30)
}
