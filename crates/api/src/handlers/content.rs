//! Handlers for content item CRUD and schedule application.
//!
//! Customer uploads come in unauthenticated from the upload pipeline and
//! start fully pending. Admin uploads arrive through the operator surface,
//! skip payment and moderation, and join the queue immediately.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use showyo_core::error::CoreError;
use showyo_core::lifecycle::CompletionCause;
use showyo_core::media::{validate_content_type, validate_storage_path};
use showyo_core::schedule::ScheduleConfig;
use showyo_core::status::DisplayStatus;
use showyo_core::types::DbId;
use showyo_db::models::content_item::{ContentItem, ContentItemUpdate, ContentListQuery, NewContentItem};
use showyo_db::repositories::{ContentItemRepo, QueueRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Operator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate the media fields shared by customer and admin uploads.
fn validate_new_item(input: &NewContentItem) -> Result<(), CoreError> {
    validate_content_type(&input.content_type)?;
    if let Some(path) = &input.storage_path {
        validate_storage_path(path)?;
    }
    Ok(())
}

/// Fetch an item or fail with `NotFound`.
async fn fetch_item(state: &AppState, id: DbId) -> AppResult<ContentItem> {
    ContentItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "content_item",
                id,
            })
        })
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// POST /api/v1/content
///
/// The upload pipeline registers a customer item. Status starts at
/// `(pending, pending, pending)`; the item enters the queue when moderation
/// approves it.
pub async fn create_content(
    State(state): State<AppState>,
    Json(input): Json<NewContentItem>,
) -> AppResult<impl IntoResponse> {
    validate_new_item(&input)?;

    let item = ContentItemRepo::create(&state.pool, &input, false).await?;

    tracing::info!(
        content_id = item.id,
        file_name = %item.file_name,
        "Customer content registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// POST /api/v1/admin/content
///
/// Operator upload: payment and moderation are bypassed and the item is
/// appended to the queue tail right away.
pub async fn create_admin_content(
    _op: Operator,
    State(state): State<AppState>,
    Json(input): Json<NewContentItem>,
) -> AppResult<impl IntoResponse> {
    validate_new_item(&input)?;

    let item = ContentItemRepo::create(&state.pool, &input, true).await?;
    QueueRepo::enqueue(&state.pool, item.display_id, item.id).await?;

    tracing::info!(
        content_id = item.id,
        display_id = item.display_id,
        file_name = %item.file_name,
        "Admin content registered and enqueued"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/content/{id}
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = fetch_item(&state, id).await?;
    Ok(Json(DataResponse { data: item }))
}

/// GET /api/v1/content
///
/// Operator listing with optional per-axis status filters and pagination.
pub async fn list_content(
    _op: Operator,
    State(state): State<AppState>,
    Query(params): Query<ContentListQuery>,
) -> AppResult<impl IntoResponse> {
    let items = ContentItemRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// PATCH /api/v1/content/{id}
///
/// Operator partial update. A requested display-axis move goes through the
/// state machine first; manual completion also removes queue membership.
pub async fn update_content(
    _op: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ContentItemUpdate>,
) -> AppResult<impl IntoResponse> {
    let item = fetch_item(&state, id).await?;

    if let Some(target) = &input.display_status {
        let target = DisplayStatus::from_str(target)?;
        let current = item.display()?;
        current.validate_transition(target)?;

        match target {
            DisplayStatus::Completed => {
                let moved =
                    ContentItemRepo::complete(&state.pool, id, CompletionCause::Manual, false)
                        .await?;
                if !moved {
                    return Err(AppError::Core(CoreError::Conflict(
                        "Item was completed concurrently".into(),
                    )));
                }
                if QueueRepo::dequeue(&state.pool, id).await?.is_some() {
                    QueueRepo::renumber(&state.pool, item.display_id).await?;
                }
                tracing::info!(content_id = id, "Content manually completed");
            }
            DisplayStatus::Queued | DisplayStatus::Active => {
                let moved =
                    ContentItemRepo::transition_display(&state.pool, id, current, target).await?;
                if !moved {
                    return Err(AppError::Core(CoreError::Conflict(
                        "Display status moved concurrently; retry with a fresh read".into(),
                    )));
                }
                // Entering the rotation needs a membership row; enqueue is a
                // no-op for items already queued.
                QueueRepo::enqueue(&state.pool, item.display_id, id).await?;
                tracing::info!(
                    content_id = id,
                    from = current.as_str(),
                    to = target.as_str(),
                    "Display status updated"
                );
            }
            DisplayStatus::Pending | DisplayStatus::Rejected => {
                // Rejection goes through the moderation callback so the
                // reason is recorded; pending is never a target.
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Display status '{}' cannot be set directly",
                    target.as_str()
                ))));
            }
        }
    }

    let updated = ContentItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "content_item",
                id,
            })
        })?;

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// PUT /api/v1/content/{id}/schedule
///
/// Replace the item's schedule with a validated config. Malformed windows
/// and contradictory repeat modes are rejected here, at the boundary, and
/// rejected or completed items refuse the rewrite outright.
pub async fn apply_schedule(
    _op: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(config): Json<ScheduleConfig>,
) -> AppResult<impl IntoResponse> {
    config.validate()?;

    let item = fetch_item(&state, id).await?;
    if !item.lifecycle(Utc::now())?.accepts_schedule_change() {
        return Err(AppError::Core(CoreError::Conflict(
            "Rejected or completed content cannot be rescheduled".into(),
        )));
    }

    let updated = ContentItemRepo::apply_schedule(&state.pool, id, &config)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "content_item",
                id,
            })
        })?;

    tracing::info!(
        content_id = id,
        scheduled_start = ?config.scheduled_start,
        scheduled_end = ?config.scheduled_end,
        auto_delete_after_end = config.auto_delete_after_end,
        "Schedule applied"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// DELETE /api/v1/content/{id}
///
/// Operator delete: queue membership cascades, positions are compacted,
/// then the storage collaborator is told to drop the backing object. A
/// storage failure is logged and never rolls back the delete.
pub async fn delete_content(
    _op: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ContentItemRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "content_item",
                id,
            })
        })?;

    QueueRepo::renumber(&state.pool, deleted.display_id).await?;

    if let Some(storage_path) = &deleted.storage_path {
        if let Err(e) = state.media.remove(storage_path).await {
            tracing::warn!(
                content_id = id,
                storage_path = %storage_path,
                error = %e,
                "Media object removal failed; row already deleted"
            );
        }
    }

    tracing::info!(content_id = id, "Content deleted");

    Ok(StatusCode::NO_CONTENT)
}
