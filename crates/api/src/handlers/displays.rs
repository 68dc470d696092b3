//! Handlers for the display registry and its settings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use showyo_core::error::CoreError;
use showyo_core::types::DbId;
use showyo_db::models::display::{DisplayUpdate, NewDisplay};
use showyo_db::repositories::DisplayRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Operator;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/displays
pub async fn list_displays(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let displays = DisplayRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: displays }))
}

/// GET /api/v1/displays/{id}
pub async fn get_display(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let display = DisplayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "display", id }))?;
    Ok(Json(DataResponse { data: display }))
}

/// POST /api/v1/displays
pub async fn create_display(
    _op: Operator,
    State(state): State<AppState>,
    Json(input): Json<NewDisplay>,
) -> AppResult<impl IntoResponse> {
    let created = DisplayRepo::create(&state.pool, &input).await?;
    tracing::info!(display_id = created.id, name = %created.name, "Display registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PATCH /api/v1/displays/{id}
pub async fn update_display(
    _op: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DisplayUpdate>,
) -> AppResult<impl IntoResponse> {
    let display = DisplayRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "display", id }))?;
    tracing::info!(display_id = id, "Display settings updated");
    Ok(Json(DataResponse { data: display }))
}
