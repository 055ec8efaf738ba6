use actix_web::{get, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{request::ResultsQuery, response::{ResultSummary, ResultsPage}},
};

/// The caller's own results, newest first.
#[get("/api/results")]
pub async fn get_my_results(
    state: web::Data<AppState>,
    query: web::Query<ResultsQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let (offset, limit) = (query.offset(), query.limit());
    let (items, total) = state
        .recorder
        .results_for_user(&auth.0.sub, query.quiz_id, offset, limit)
        .await?;

    Ok(HttpResponse::Ok().json(ResultsPage {
        items: items.into_iter().map(ResultSummary::from).collect(),
        total,
        offset,
        limit,
    }))
}
