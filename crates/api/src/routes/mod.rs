pub mod airtable;
pub mod auth;
pub mod health;
pub mod interview;
pub mod interview_screen;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /interviews                          list, create
/// /interviews/{id}                     get (with screens), update, delete
/// /interviews/{id}/starting_state      replace starting flow (POST)
///
/// /interview_screens                   create
/// /interview_screens/{id}              get (with children), update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/interviews", interview::router())
        .nest("/interview_screens", interview_screen::router())
}
