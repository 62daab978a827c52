//! Route definitions for the `/interviews` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::interview;
use crate::state::AppState;

/// Routes mounted at `/interviews`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
/// POST   /{id}/starting_state  -> set_starting_state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(interview::list).post(interview::create))
        .route(
            "/{id}",
            get(interview::get_by_id)
                .put(interview::update)
                .delete(interview::delete),
        )
        .route("/{id}/starting_state", post(interview::set_starting_state))
}
