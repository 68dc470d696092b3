//! Content item entity models and DTOs.

use serde::{Deserialize, Serialize};
use showyo_core::error::CoreError;
use showyo_core::lifecycle::{CompletionCause, ContentState, StatusSnapshot};
use showyo_core::playback::PlayPolicyInput;
use showyo_core::status::{DisplayStatus, ModerationStatus, PaymentStatus};
use showyo_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `content_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub display_id: DbId,
    pub file_name: String,
    pub content_type: String,
    pub storage_path: Option<String>,
    pub checksum_sha256: Option<String>,
    pub media_duration_secs: Option<i32>,
    pub custom_duration_secs: Option<i32>,
    pub border_id: Option<DbId>,
    pub customer_email: Option<String>,
    pub price_cents: Option<i32>,
    pub currency: String,
    pub pricing_option_id: Option<DbId>,
    pub is_admin_content: bool,
    pub payment_status: String,
    pub moderation_status: String,
    pub display_status: String,
    pub moderation_reason: Option<String>,
    pub scheduled_start: Option<Timestamp>,
    pub scheduled_end: Option<Timestamp>,
    pub auto_delete_after_end: bool,
    pub repeat_frequency_per_day: i32,
    pub timer_loop_enabled: bool,
    pub timer_loop_minutes: Option<i32>,
    pub play_count: i32,
    pub max_plays: Option<i32>,
    pub auto_complete_after_play: bool,
    pub last_played_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub completion_cause: Option<String>,
    pub system_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContentItem {
    /// Parse the payment axis. The CHECK constraint keeps rows valid, so a
    /// parse failure means schema drift.
    pub fn payment(&self) -> Result<PaymentStatus, CoreError> {
        PaymentStatus::from_str(&self.payment_status)
    }

    /// Parse the moderation axis.
    pub fn moderation(&self) -> Result<ModerationStatus, CoreError> {
        ModerationStatus::from_str(&self.moderation_status)
    }

    /// Parse the display axis.
    pub fn display(&self) -> Result<DisplayStatus, CoreError> {
        DisplayStatus::from_str(&self.display_status)
    }

    /// Fold the row into the unified lifecycle state at `now`.
    pub fn lifecycle(&self, now: Timestamp) -> Result<ContentState, CoreError> {
        let completion_cause = match &self.completion_cause {
            Some(cause) => Some(CompletionCause::from_str(cause)?),
            None => None,
        };
        let snapshot = StatusSnapshot {
            payment: self.payment()?,
            moderation: self.moderation()?,
            display: self.display()?,
            is_admin_content: self.is_admin_content,
            moderation_reason: self.moderation_reason.clone(),
            completion_cause,
            scheduled_start: self.scheduled_start,
            scheduled_end: self.scheduled_end,
        };
        Ok(ContentState::derive(&snapshot, now))
    }

    /// The slice of the row the play policy needs.
    pub fn play_policy_input(&self) -> PlayPolicyInput {
        PlayPolicyInput {
            is_admin_content: self.is_admin_content,
            pricing_option_id: self.pricing_option_id,
            scheduled_start: self.scheduled_start,
            scheduled_end: self.scheduled_end,
            repeat_frequency_per_day: self.repeat_frequency_per_day,
            timer_loop_enabled: self.timer_loop_enabled,
            auto_complete_after_play: self.auto_complete_after_play,
            max_plays: self.max_plays,
        }
    }
}

/// DTO for registering an uploaded item via `POST /api/v1/content`.
#[derive(Debug, Deserialize)]
pub struct NewContentItem {
    pub file_name: String,
    pub content_type: String,
    pub storage_path: Option<String>,
    pub checksum_sha256: Option<String>,
    pub media_duration_secs: Option<i32>,
    pub display_id: Option<DbId>,
    pub border_id: Option<DbId>,
    pub customer_email: Option<String>,
    pub price_cents: Option<i32>,
    pub currency: Option<String>,
    pub pricing_option_id: Option<DbId>,
}

/// DTO for operator patches via `PATCH /api/v1/content/{id}`.
///
/// All fields optional; unset fields keep their current value. The display
/// axis goes through the state machine before the write.
#[derive(Debug, Default, Deserialize)]
pub struct ContentItemUpdate {
    pub file_name: Option<String>,
    pub storage_path: Option<String>,
    pub checksum_sha256: Option<String>,
    pub media_duration_secs: Option<i32>,
    pub border_id: Option<DbId>,
    pub customer_email: Option<String>,
    pub price_cents: Option<i32>,
    pub currency: Option<String>,
    pub pricing_option_id: Option<DbId>,
    pub max_plays: Option<i32>,
    pub auto_complete_after_play: Option<bool>,
    pub display_status: Option<String>,
}

/// Query parameters for `GET /api/v1/content`.
#[derive(Debug, Default, Deserialize)]
pub struct ContentListQuery {
    pub payment_status: Option<String>,
    pub moderation_status: Option<String>,
    pub display_status: Option<String>,
    pub display_id: Option<DbId>,
    pub is_admin_content: Option<bool>,
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Body of the moderation collaborator callback.
#[derive(Debug, Deserialize)]
pub struct ModerationVerdict {
    /// `approved` or `rejected`.
    pub decision: String,
    /// Required when rejecting.
    pub reason: Option<String>,
}

/// Body of the payment collaborator callback.
#[derive(Debug, Deserialize)]
pub struct PaymentUpdate {
    /// Target payment status, validated through the payment state machine.
    pub status: String,
}

/// Body of the play report posted by a display client.
#[derive(Debug, Deserialize)]
pub struct PlayReport {
    pub started_at: Timestamp,
    pub completed_at: Timestamp,
}

/// Identity of a deleted row, returned so the caller can cascade cleanup.
#[derive(Debug, Clone, FromRow)]
pub struct DeletedContentItem {
    pub display_id: DbId,
    pub storage_path: Option<String>,
}

/// One expired row retired by the sweeper.
#[derive(Debug, Clone, FromRow)]
pub struct SweptItem {
    pub id: DbId,
    pub display_id: DbId,
}
