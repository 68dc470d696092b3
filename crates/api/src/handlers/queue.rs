//! Queue assembly and operator reordering.
//!
//! Assembly is a read-only projection: candidate rows come from one query,
//! the visibility evaluator runs over them at the current instant, and
//! nothing is mutated, so displays can poll as often as they like.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use showyo_core::error::CoreError;
use showyo_core::media::{effective_duration_secs, MediaKind};
use showyo_core::status::DisplayStatus;
use showyo_core::types::{DbId, Timestamp};
use showyo_core::visibility::{evaluate, VisibilityInput};
use showyo_db::models::display::DEFAULT_DISPLAY_ID;
use showyo_db::models::queue_entry::ReorderRequest;
use showyo_db::repositories::{DisplayRepo, PlayHistoryRepo, QueueRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Operator;
use crate::response::DataResponse;
use crate::state::AppState;

/// One entry of the live playlist served to a display client.
#[derive(Debug, Serialize)]
pub struct QueueItemResponse {
    pub content_item_id: DbId,
    pub position: i32,
    pub file_name: String,
    pub content_type: String,
    pub storage_path: String,
    pub border_id: Option<DbId>,
    /// On-screen seconds: custom/default for photos, natural for videos.
    pub duration_secs: i32,
    pub repeat_frequency_per_day: i32,
    pub timer_loop_enabled: bool,
    pub timer_loop_minutes: Option<i32>,
    pub play_count: i32,
    pub plays_today: i64,
    /// Whole minutes until the schedule window closes, when one exists.
    pub expires_in_minutes: Option<i64>,
}

/// Build the ordered, visible playlist for one display at `now`.
pub async fn assemble_queue(
    state: &AppState,
    display_id: DbId,
    now: Timestamp,
) -> AppResult<Vec<QueueItemResponse>> {
    let rows = QueueRepo::assemble_candidates(&state.pool, display_id).await?;

    let mut playlist = Vec::with_capacity(rows.len());
    for row in rows {
        let display_status = DisplayStatus::from_str(&row.display_status)?;
        let verdict = evaluate(
            &VisibilityInput {
                display_status,
                scheduled_start: row.scheduled_start,
                scheduled_end: row.scheduled_end,
            },
            now,
        );
        if !verdict.visible {
            continue;
        }

        let Some(storage_path) = row.storage_path else {
            continue;
        };
        let kind = MediaKind::from_content_type(&row.content_type)?;
        let duration_secs = effective_duration_secs(
            kind,
            row.custom_duration_secs,
            row.media_duration_secs,
            row.default_photo_duration_secs,
        );
        let plays_today =
            PlayHistoryRepo::plays_today(&state.pool, row.content_item_id, now).await?;

        playlist.push(QueueItemResponse {
            content_item_id: row.content_item_id,
            position: row.position,
            file_name: row.file_name,
            content_type: row.content_type,
            storage_path,
            border_id: row.border_id,
            duration_secs,
            repeat_frequency_per_day: row.repeat_frequency_per_day,
            timer_loop_enabled: row.timer_loop_enabled,
            timer_loop_minutes: row.timer_loop_minutes,
            play_count: row.play_count,
            plays_today,
            expires_in_minutes: verdict.expires_in_minutes,
        });
    }

    Ok(playlist)
}

async fn require_display(state: &AppState, id: DbId) -> AppResult<()> {
    DisplayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "display",
                id,
            })
        })?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// GET /api/v1/queue
///
/// The live playlist for the default display.
pub async fn get_queue(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let playlist = assemble_queue(&state, DEFAULT_DISPLAY_ID, Utc::now()).await?;
    Ok(Json(DataResponse { data: playlist }))
}

/// GET /api/v1/displays/{id}/queue
///
/// The live playlist for one display.
pub async fn get_display_queue(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_display(&state, id).await?;
    let playlist = assemble_queue(&state, id, Utc::now()).await?;
    Ok(Json(DataResponse { data: playlist }))
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/queue/reorder
///
/// Bulk reorder for one display. An unknown id in the request means the
/// queue changed underneath the operator: 409, retry with a fresh read.
/// Returns the freshly assembled playlist.
pub async fn reorder_queue(
    _op: Operator,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let mut seen = HashSet::new();
    if input.items.iter().any(|e| !seen.insert(e.id)) {
        return Err(AppError::Core(CoreError::Validation(
            "A reorder must name each item at most once".into(),
        )));
    }

    let display_id = input.display_id.unwrap_or(DEFAULT_DISPLAY_ID);
    require_display(&state, display_id).await?;

    let applied = QueueRepo::reorder(&state.pool, display_id, &input.items).await?;
    if !applied {
        return Err(AppError::Core(CoreError::Conflict(
            "Reorder refers to items no longer in this queue; retry with a fresh read".into(),
        )));
    }

    tracing::info!(
        display_id,
        moved = input.items.len(),
        "Queue reordered"
    );

    let playlist = assemble_queue(&state, display_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: playlist }))
}
