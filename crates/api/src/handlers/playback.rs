//! Play reporting and the audit trail.
//!
//! The display client posts a report after each playback. The count bump
//! and history append commit first, in one transaction; any play-triggered
//! retirement happens afterwards and is never allowed to roll them back.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use showyo_core::error::CoreError;
use showyo_core::lifecycle::CompletionCause;
use showyo_core::playback::evaluate_play;
use showyo_core::types::DbId;
use showyo_db::models::content_item::PlayReport;
use showyo_db::repositories::{ContentItemRepo, PlayHistoryRepo, QueueRepo};
use showyo_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Operator;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for POST /content/{id}/play.
#[derive(Debug, Serialize)]
pub struct PlayReportResponse {
    pub play_count: i32,
    pub auto_deleted: bool,
    pub reached_cap: bool,
}

/// POST /api/v1/content/{id}/play
///
/// Records one completed playback and applies the play-outcome policy:
/// paid one-shot content retires immediately, repeat content retires at
/// the cap when configured to, and the cap flag alone is advisory.
pub async fn report_play(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(report): Json<PlayReport>,
) -> AppResult<impl IntoResponse> {
    if report.completed_at < report.started_at {
        return Err(AppError::Core(CoreError::Validation(
            "Play completion must not precede its start".into(),
        )));
    }

    // A report against content outside the rotation means the display raced
    // a removal; the count must not move.
    let current = ContentItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "content_item",
                id,
            })
        })?;
    if !current.lifecycle(Utc::now())?.accepts_play() {
        return Err(AppError::Core(CoreError::Conflict(
            "Content is no longer in the rotation; refresh the playlist".into(),
        )));
    }

    let (item, _entry) =
        ContentItemRepo::record_play(&state.pool, id, report.started_at, report.completed_at)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "content_item",
                    id,
                })
            })?;

    let outcome = evaluate_play(&item.play_policy_input(), item.play_count);

    tracing::info!(
        content_id = id,
        play_count = item.play_count,
        reached_cap = outcome.reached_cap,
        completion = ?outcome.completion.map(|c| c.as_str()),
        "Play recorded"
    );

    if let Some(cause) = outcome.completion {
        // Best-effort: the play is already durably recorded. A failure here
        // is logged for retry, never propagated to the display client.
        if let Err(e) = retire(&state.pool, id, item.display_id, cause).await {
            tracing::error!(
                content_id = id,
                cause = cause.as_str(),
                error = %e,
                "Play-triggered retirement failed; play count stands"
            );
        }
    }

    Ok(Json(DataResponse {
        data: PlayReportResponse {
            play_count: item.play_count,
            auto_deleted: outcome.auto_deleted(),
            reached_cap: outcome.reached_cap,
        },
    }))
}

/// Complete an item after a qualifying play and drop its queue membership.
async fn retire(
    pool: &DbPool,
    id: DbId,
    display_id: DbId,
    cause: CompletionCause,
) -> Result<(), sqlx::Error> {
    ContentItemRepo::complete(pool, id, cause, true).await?;
    if QueueRepo::dequeue(pool, id).await?.is_some() {
        QueueRepo::renumber(pool, display_id).await?;
    }
    tracing::info!(content_id = id, cause = cause.as_str(), "Content retired after play");
    Ok(())
}

/// GET /api/v1/content/{id}/plays
///
/// Operator audit listing of the play history for one item, newest first.
/// History rows survive item deletion, so this works for deleted content
/// too.
pub async fn list_plays(
    _op: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let plays =
        PlayHistoryRepo::list_for_item(&state.pool, id, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: plays }))
}
