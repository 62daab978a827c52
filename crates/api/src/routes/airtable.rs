//! Route definitions for the `/airtable-records` passthrough.

use axum::routing::get;
use axum::Router;

use crate::handlers::airtable;
use crate::state::AppState;

/// Routes mounted at `/airtable-records` (all require auth).
///
/// ```text
/// GET  /{table}              -> search (query params are column filters)
/// POST /{table}              -> create
/// GET  /{table}/{record_id}  -> get_by_id
/// PUT  /{table}/{record_id}  -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{table}", get(airtable::search).post(airtable::create))
        .route(
            "/{table}/{record_id}",
            get(airtable::get_by_id).put(airtable::update),
        )
}
