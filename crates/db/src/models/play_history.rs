//! Play history entity model.
//!
//! Append-only: rows are written by the play reporter and never touched
//! again. Item fields are denormalized so the audit trail survives content
//! deletion.

use serde::Serialize;
use showyo_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `play_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayHistoryEntry {
    pub id: DbId,
    pub content_item_id: DbId,
    pub display_id: DbId,
    pub customer_email: Option<String>,
    pub pricing_option_id: Option<DbId>,
    pub file_name: String,
    pub storage_path: Option<String>,
    pub price_cents: Option<i32>,
    pub currency: String,
    /// The item's play count as of this play (1-based).
    pub play_number: i32,
    pub started_at: Timestamp,
    pub completed_at: Timestamp,
    pub created_at: Timestamp,
}
