//! Queue membership entity models and DTOs.

use serde::{Deserialize, Serialize};
use showyo_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `queue_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QueueEntry {
    pub id: DbId,
    pub display_id: DbId,
    pub content_item_id: DbId,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One row of the assembled queue: queue membership joined with the content
/// fields the visibility evaluator and the kiosk response need, plus the
/// display's default photo duration.
#[derive(Debug, Clone, FromRow)]
pub struct QueueItemRow {
    pub content_item_id: DbId,
    pub position: i32,
    pub file_name: String,
    pub content_type: String,
    pub storage_path: Option<String>,
    pub border_id: Option<DbId>,
    pub custom_duration_secs: Option<i32>,
    pub media_duration_secs: Option<i32>,
    pub display_status: String,
    pub scheduled_start: Option<Timestamp>,
    pub scheduled_end: Option<Timestamp>,
    pub repeat_frequency_per_day: i32,
    pub timer_loop_enabled: bool,
    pub timer_loop_minutes: Option<i32>,
    pub play_count: i32,
    pub max_plays: Option<i32>,
    pub default_photo_duration_secs: i32,
}

/// One requested placement in a bulk reorder.
#[derive(Debug, Deserialize)]
pub struct ReorderEntry {
    pub id: DbId,
    pub position: i32,
}

/// Body of `PUT /api/v1/admin/queue/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// Defaults to the seeded display when omitted.
    pub display_id: Option<DbId>,
    pub items: Vec<ReorderEntry>,
}
