//! Handlers for the border theme catalog.
//!
//! Reads are public so the kiosk and the upload form can show the catalog;
//! mutations are operator-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use showyo_core::error::CoreError;
use showyo_core::types::DbId;
use showyo_db::models::border::{BorderUpdate, NewBorder};
use showyo_db::repositories::BorderRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Operator;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/borders
pub async fn list_borders(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let borders = BorderRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: borders }))
}

/// GET /api/v1/borders/{id}
pub async fn get_border(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let border = BorderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "border", id }))?;
    Ok(Json(DataResponse { data: border }))
}

/// POST /api/v1/borders
pub async fn create_border(
    _op: Operator,
    State(state): State<AppState>,
    Json(input): Json<NewBorder>,
) -> AppResult<impl IntoResponse> {
    let border = BorderRepo::create(&state.pool, &input).await?;
    tracing::info!(border_id = border.id, name = %border.name, "Border created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: border })))
}

/// PATCH /api/v1/borders/{id}
pub async fn update_border(
    _op: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BorderUpdate>,
) -> AppResult<impl IntoResponse> {
    let border = BorderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "border", id }))?;
    Ok(Json(DataResponse { data: border }))
}

/// DELETE /api/v1/borders/{id}
///
/// Content referencing the border keeps playing without one.
pub async fn delete_border(
    _op: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BorderRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "border", id }));
    }
    tracing::info!(border_id = id, "Border deleted");
    Ok(StatusCode::NO_CONTENT)
}
