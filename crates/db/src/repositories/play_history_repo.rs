//! Repository for the `play_history` table.
//!
//! The table is append-only. The insert itself lives in
//! `ContentItemRepo::record_play` so the count bump and the history row
//! share one transaction; this module owns the read side.

use sqlx::PgPool;

use showyo_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use showyo_core::types::{DbId, Timestamp};

use crate::models::play_history::PlayHistoryEntry;

/// Column list for `play_history` queries.
pub const COLUMNS: &str = "\
    id, content_item_id, display_id, customer_email, pricing_option_id, \
    file_name, storage_path, price_cents, currency, play_number, \
    started_at, completed_at, created_at";

/// Read access to the play audit log.
pub struct PlayHistoryRepo;

impl PlayHistoryRepo {
    /// List the plays recorded for one item, newest first.
    pub async fn list_for_item(
        pool: &PgPool,
        content_item_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PlayHistoryEntry>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT {COLUMNS} FROM play_history \
             WHERE content_item_id = $1 \
             ORDER BY completed_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PlayHistoryEntry>(&query)
            .bind(content_item_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Plays completed for an item since the start of the current UTC day.
    ///
    /// Backs daily-cap audits for repeat scheduling.
    pub async fn plays_today(
        pool: &PgPool,
        content_item_id: DbId,
        now: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM play_history \
             WHERE content_item_id = $1 \
               AND completed_at >= date_trunc('day', $2::timestamptz)",
        )
        .bind(content_item_id)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
