//! Collaborator callbacks: moderation verdicts and payment confirmations.
//!
//! Both arrive as fire-and-forget POSTs from external services. A verdict
//! that loses a race against a concurrent transition comes back as 409 so
//! the collaborator can re-read and retry; an outage on their side simply
//! leaves the item pending.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use showyo_core::error::CoreError;
use showyo_core::status::{ModerationStatus, PaymentStatus};
use showyo_core::types::DbId;
use showyo_db::models::content_item::{ModerationVerdict, PaymentUpdate};
use showyo_db::repositories::{ContentItemRepo, QueueRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// POST /api/v1/content/{id}/moderation
///
/// Approval queues the item and appends it to its display's queue tail.
/// Rejection requires a reason and removes any queue membership.
pub async fn apply_moderation_verdict(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(verdict): Json<ModerationVerdict>,
) -> AppResult<impl IntoResponse> {
    let item = ContentItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "content_item",
                id,
            })
        })?;

    // A takedown of live content is fine; a verdict on a finished run is not.
    if !item.lifecycle(Utc::now())?.accepts_moderation() {
        return Err(AppError::Core(CoreError::Conflict(
            "Completed content no longer accepts moderation verdicts".into(),
        )));
    }

    let current = item.moderation()?;
    let target = ModerationStatus::from_str(&verdict.decision)?;
    current.validate_transition(target)?;

    match target {
        ModerationStatus::Approved => {
            let moved = ContentItemRepo::approve_moderation(&state.pool, id).await?;
            if !moved {
                return Err(AppError::Core(CoreError::Conflict(
                    "Moderation state moved concurrently; retry with a fresh read".into(),
                )));
            }
            QueueRepo::enqueue(&state.pool, item.display_id, id).await?;

            tracing::info!(
                content_id = id,
                display_id = item.display_id,
                "Content approved and enqueued"
            );
        }
        ModerationStatus::Rejected => {
            let reason = verdict
                .reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(
                        "A rejection requires a reason".into(),
                    ))
                })?;

            let moved =
                ContentItemRepo::reject_moderation(&state.pool, id, reason, current).await?;
            if !moved {
                return Err(AppError::Core(CoreError::Conflict(
                    "Moderation state moved concurrently; retry with a fresh read".into(),
                )));
            }
            if QueueRepo::dequeue(&state.pool, id).await?.is_some() {
                QueueRepo::renumber(&state.pool, item.display_id).await?;
            }

            tracing::info!(content_id = id, reason = %reason, "Content rejected");
        }
        ModerationStatus::Pending => {
            // Unreachable: no transition leads back to pending.
            return Err(AppError::Core(CoreError::Validation(
                "A moderation verdict must approve or reject".into(),
            )));
        }
    }

    let updated = ContentItemRepo::find_by_id(&state.pool, id)
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
// Payment
// ---------------------------------------------------------------------------

/// POST /api/v1/content/{id}/payment
///
/// The payment collaborator reports a status change, validated through the
/// payment state machine.
pub async fn apply_payment_update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(update): Json<PaymentUpdate>,
) -> AppResult<impl IntoResponse> {
    let item = ContentItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "content_item",
                id,
            })
        })?;

    let current = item.payment()?;
    let target = PaymentStatus::from_str(&update.status)?;
    current.validate_transition(target)?;

    let moved = ContentItemRepo::transition_payment(&state.pool, id, current, target).await?;
    if !moved {
        return Err(AppError::Core(CoreError::Conflict(
            "Payment state moved concurrently; retry with a fresh read".into(),
        )));
    }

    tracing::info!(
        content_id = id,
        from = current.as_str(),
        to = target.as_str(),
        "Payment status updated"
    );

    let updated = ContentItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "content_item",
                id,
            })
        })?;
    Ok(Json(DataResponse { data: updated }))
}
