//! Route definitions for the `/interview_screens` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::interview_screen;
use crate::state::AppState;

/// Routes mounted at `/interview_screens`.
///
/// ```text
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(interview_screen::create)).route(
        "/{id}",
        get(interview_screen::get_by_id)
            .put(interview_screen::update)
            .delete(interview_screen::delete),
    )
}
