use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser, OptionalPlayer},
    errors::AppError,
    models::dto::{
        request::{CreateQuizRequest, StartAttemptQuery, SubmitQuizRequest},
        response::QuizCreatedResponse,
    },
};

#[get("/api/quiz-questions")]
pub async fn get_quiz_questions(
    state: web::Data<AppState>,
    query: web::Query<StartAttemptQuery>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .start_attempt(query.quiz_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/submit-quiz")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
    player: OptionalPlayer,
) -> Result<HttpResponse, AppError> {
    let report = state
        .attempt_service
        .submit(player.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

#[post("/api/create-quiz")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let quiz = state
        .quiz_service
        .create_quiz(request.into_inner(), Some(&auth.0.sub))
        .await?;
    Ok(HttpResponse::Created().json(QuizCreatedResponse {
        message: "Quiz created successfully".to_string(),
        quiz_id: quiz.id,
    }))
}
