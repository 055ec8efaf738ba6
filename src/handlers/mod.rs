use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;

pub mod attempt_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod result_handler;

/// Malformed JSON bodies surface as 400 with the usual error envelope.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", err);
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health_handler::health_check)
        .service(health_handler::health_check_ready)
        .service(health_handler::health_check_live)
        .service(quiz_handler::get_quiz_questions)
        .service(quiz_handler::submit_quiz)
        .service(quiz_handler::create_quiz)
        .service(attempt_handler::start_attempt)
        .service(attempt_handler::capture_answer)
        .service(attempt_handler::navigate)
        .service(attempt_handler::submit_attempt)
        .service(attempt_handler::get_attempt)
        .service(result_handler::get_my_results);
}
