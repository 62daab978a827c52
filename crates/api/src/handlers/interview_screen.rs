//! Handlers for the `/interview_screens` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scout_core::types::DbId;
use scout_db::models::screen::{CreateScreen, Screen, ScreenWithChildren, UpdateScreen};

use crate::error::AppResult;
use crate::service::ScreenService;
use crate::state::AppState;

/// POST /api/interview_screens
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateScreen>,
) -> AppResult<(StatusCode, Json<Screen>)> {
    let screen = ScreenService::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(screen)))
}

/// GET /api/interview_screens/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScreenWithChildren>> {
    let screen = ScreenService::get_with_children(&state.pool, id).await?;
    Ok(Json(screen))
}

/// PUT /api/interview_screens/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScreen>,
) -> AppResult<Json<ScreenWithChildren>> {
    let screen = ScreenService::update(&state.pool, id, input).await?;
    Ok(Json(screen))
}

/// DELETE /api/interview_screens/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    ScreenService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
