//! Handlers for the `/interviews` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scout_core::types::DbId;
use scout_db::models::interview::{
    CreateInterview, Interview, InterviewWithScreens, InterviewWithSettings, UpdateInterview,
};

use crate::error::AppResult;
use crate::service::InterviewService;
use crate::state::AppState;

/// POST /api/interviews
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInterview>,
) -> AppResult<(StatusCode, Json<InterviewWithSettings>)> {
    let interview = InterviewService::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

/// GET /api/interviews
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Interview>>> {
    let interviews = InterviewService::list(&state.pool).await?;
    Ok(Json(interviews))
}

/// GET /api/interviews/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<InterviewWithScreens>> {
    let interview = InterviewService::get_with_screens(&state.pool, id).await?;
    Ok(Json(interview))
}

/// PUT /api/interviews/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInterview>,
) -> AppResult<Json<InterviewWithSettings>> {
    let interview = InterviewService::update(&state.pool, id, &input).await?;
    Ok(Json(interview))
}

/// DELETE /api/interviews/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    InterviewService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/interviews/{id}/starting_state
///
/// Body is the ordered list of screen ids making up the starting flow.
pub async fn set_starting_state(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(starting_flow): Json<Vec<DbId>>,
) -> AppResult<Json<InterviewWithScreens>> {
    let interview = InterviewService::set_starting_state(&state.pool, id, &starting_flow).await?;
    Ok(Json(interview))
}
