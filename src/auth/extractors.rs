use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};

use crate::{
    app_state::AppState,
    auth::Claims,
    errors::{AppError, AppResult},
};

/// `Ok(None)` when no Authorization header is present. A header that is
/// present but malformed or unverifiable is an error.
fn bearer_claims(req: &HttpRequest) -> AppResult<Option<Claims>> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

    state.jwt_service.validate_token(token).map(Some)
}

/// Handler argument for endpoints that require a signed-in caller.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = bearer_claims(req).and_then(|claims| {
            claims.ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
        });

        ready(claims.map(AuthenticatedUser))
    }
}

/// Handler argument for endpoints open to anonymous players. Results are
/// only recorded when a player is present.
pub struct OptionalPlayer(pub Option<Claims>);

impl OptionalPlayer {
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_ref().map(|claims| claims.sub.as_str())
    }
}

impl FromRequest for OptionalPlayer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(bearer_claims(req).map(OptionalPlayer))
    }
}
