//! Handlers for the `/airtable-records` passthrough.
//!
//! All routes require an authenticated caller; the Airtable key stays on the
//! server.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::airtable::{Record, RecordFields};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /airtable-records/{table}
///
/// Every query parameter is treated as a `column=value` equality filter.
pub async fn search(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(filters): Query<BTreeMap<String, String>>,
) -> AppResult<Json<Vec<Record>>> {
    let records = state.airtable.search_records(&table, &filters).await?;
    Ok(Json(records))
}

/// GET /airtable-records/{table}/{record_id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((table, record_id)): Path<(String, String)>,
) -> AppResult<Json<Record>> {
    let record = state.airtable.fetch_record(&table, &record_id).await?;
    Ok(Json(record))
}

/// POST /airtable-records/{table}
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(input): Json<RecordFields>,
) -> AppResult<(StatusCode, Json<Record>)> {
    let record = state.airtable.create_record(&table, &input).await?;
    tracing::info!(subject = %user.subject, %table, record_id = %record.id, "Airtable record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /airtable-records/{table}/{record_id}
///
/// Only the supplied fields are changed.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path((table, record_id)): Path<(String, String)>,
    Json(input): Json<RecordFields>,
) -> AppResult<Json<Record>> {
    let record = state.airtable.update_record(&table, &record_id, &input).await?;
    tracing::info!(subject = %user.subject, %table, %record_id, "Airtable record updated");
    Ok(Json(record))
}
