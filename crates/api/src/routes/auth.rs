//! Route definitions for the `/auth` session check.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Mount the session check at root level.
///
/// ```text
/// GET /auth  -> check (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/auth", get(auth::check))
}
