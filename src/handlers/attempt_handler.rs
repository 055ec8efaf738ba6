use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::OptionalPlayer,
    errors::AppError,
    models::dto::{
        request::{CaptureAnswerRequest, NavigateRequest, StartSessionRequest},
        response::CaptureAnswerResponse,
    },
};

#[post("/api/attempts")]
pub async fn start_attempt(
    state: web::Data<AppState>,
    request: Option<web::Json<StartSessionRequest>>,
    player: OptionalPlayer,
) -> Result<HttpResponse, AppError> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let response = state
        .attempt_service
        .start_session(player.user_id(), request.quiz_id.as_deref())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[put("/api/attempts/{attempt_id}/answers")]
pub async fn capture_answer(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
    request: web::Json<CaptureAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let accepted = state
        .attempt_service
        .capture_answer(&attempt_id, &request.question_id, request.answers)
        .await?;
    Ok(HttpResponse::Ok().json(CaptureAnswerResponse { accepted }))
}

#[post("/api/attempts/{attempt_id}/navigate")]
pub async fn navigate(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
    request: web::Json<NavigateRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .attempt_service
        .navigate(&attempt_id, request.direction)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/attempts/{attempt_id}/submit")]
pub async fn submit_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.attempt_service.submit_session(&attempt_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/attempts/{attempt_id}")]
pub async fn get_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.attempt_service.status(&attempt_id).await?;
    Ok(HttpResponse::Ok().json(response))
}
