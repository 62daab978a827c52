//! Handler for the `/auth` session check.

use axum::Json;
use serde::Serialize;

use crate::middleware::auth::AuthUser;

/// Response for `GET /auth`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub message: &'static str,
    pub subject: String,
}

/// GET /auth -- succeeds only with a valid bearer token.
pub async fn check(user: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        message: "auth success!",
        subject: user.subject,
    })
}
