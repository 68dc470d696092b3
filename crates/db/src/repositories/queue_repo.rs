//! Repository for the `queue_entries` table.
//!
//! Queue membership is an association row, not a content field. Positions
//! carry no unique constraint: a transient duplicate or gap after a racy
//! insert is tolerated, and `renumber` heals it on the next pass.

use sqlx::{PgPool, Postgres, Transaction};

use showyo_core::status::{DISPLAY_ACTIVE, DISPLAY_QUEUED, MODERATION_APPROVED};
use showyo_core::types::DbId;

use crate::models::queue_entry::{QueueEntry, QueueItemRow, ReorderEntry};

/// Column list for `queue_entries` queries.
const COLUMNS: &str = "id, display_id, content_item_id, position, created_at, updated_at";

/// Manages queue membership and playback ordering.
pub struct QueueRepo;

impl QueueRepo {
    /// Append an item to the tail of a display's queue.
    ///
    /// Returns `None` when the item is already queued somewhere; an item
    /// appears at most once, and re-enqueueing is a no-op rather than an
    /// error so moderation retries stay idempotent.
    pub async fn enqueue(
        pool: &PgPool,
        display_id: DbId,
        content_item_id: DbId,
    ) -> Result<Option<QueueEntry>, sqlx::Error> {
        let query = format!(
            "INSERT INTO queue_entries (display_id, content_item_id, position) \
             VALUES ($1, $2, COALESCE( \
                 (SELECT MAX(position) + 1 FROM queue_entries WHERE display_id = $1), 0)) \
             ON CONFLICT ON CONSTRAINT uq_queue_entries_content_item DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QueueEntry>(&query)
            .bind(display_id)
            .bind(content_item_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove an item's queue membership, returning the display it left.
    ///
    /// The content row survives; only the association goes away. `None`
    /// means the item was not queued.
    pub async fn dequeue(
        pool: &PgPool,
        content_item_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "DELETE FROM queue_entries WHERE content_item_id = $1 RETURNING display_id",
        )
        .bind(content_item_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(display_id,)| display_id))
    }

    /// Compact a display's positions to 0..n-1, preserving relative order.
    ///
    /// Ties (transient duplicates) break by entry id. Returns the number of
    /// rows that actually moved.
    pub async fn renumber(pool: &PgPool, display_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE queue_entries qe \
             SET position = numbered.new_position \
             FROM (SELECT id, (ROW_NUMBER() OVER (ORDER BY position, id)) - 1 AS new_position \
                   FROM queue_entries WHERE display_id = $1) AS numbered \
             WHERE qe.id = numbered.id AND qe.position <> numbered.new_position",
        )
        .bind(display_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// List a display's queue entries in playback order.
    pub async fn list_for_display(
        pool: &PgPool,
        display_id: DbId,
    ) -> Result<Vec<QueueEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM queue_entries \
             WHERE display_id = $1 \
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, QueueEntry>(&query)
            .bind(display_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch the candidate rows for queue assembly: approved, queued or
    /// active, with media in place, in position order.
    ///
    /// Read-only. The caller runs the visibility evaluator over the result;
    /// nothing here mutates, so assembly is safe to repeat concurrently.
    pub async fn assemble_candidates(
        pool: &PgPool,
        display_id: DbId,
    ) -> Result<Vec<QueueItemRow>, sqlx::Error> {
        sqlx::query_as::<_, QueueItemRow>(
            "SELECT ci.id AS content_item_id, qe.position, \
                    ci.file_name, ci.content_type, ci.storage_path, ci.border_id, \
                    ci.custom_duration_secs, ci.media_duration_secs, ci.display_status, \
                    ci.scheduled_start, ci.scheduled_end, \
                    ci.repeat_frequency_per_day, ci.timer_loop_enabled, ci.timer_loop_minutes, \
                    ci.play_count, ci.max_plays, \
                    d.default_photo_duration_secs \
             FROM queue_entries qe \
             JOIN content_items ci ON ci.id = qe.content_item_id \
             JOIN displays d ON d.id = qe.display_id \
             WHERE qe.display_id = $1 \
               AND ci.moderation_status = $2 \
               AND ci.display_status IN ($3, $4) \
               AND ci.storage_path IS NOT NULL \
             ORDER BY qe.position ASC, qe.id ASC",
        )
        .bind(display_id)
        .bind(MODERATION_APPROVED)
        .bind(DISPLAY_QUEUED)
        .bind(DISPLAY_ACTIVE)
        .fetch_all(pool)
        .await
    }

    /// Apply a bulk reorder for one display, then compact to 0..n-1.
    ///
    /// Requested items are lifted out of the current order and re-inserted
    /// at their requested indexes (lowest first), so the assembled order
    /// matches the requested sequence exactly. Runs in one transaction with
    /// the rows locked. Returns `false` when a requested id is not a member
    /// of this display's queue; the caller should retry with a fresh read.
    pub async fn reorder(
        pool: &PgPool,
        display_id: DbId,
        entries: &[ReorderEntry],
    ) -> Result<bool, sqlx::Error> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM queue_entries \
             WHERE display_id = $1 \
             ORDER BY position ASC, id ASC \
             FOR UPDATE"
        );
        let current = sqlx::query_as::<_, QueueEntry>(&query)
            .bind(display_id)
            .fetch_all(&mut *tx)
            .await?;

        if entries
            .iter()
            .any(|e| !current.iter().any(|c| c.content_item_id == e.id))
        {
            return Ok(false);
        }

        // Remaining items keep their relative order; requested items slot in
        // at their requested index, lowest position first.
        let mut order: Vec<DbId> = current
            .iter()
            .map(|c| c.content_item_id)
            .filter(|id| !entries.iter().any(|e| e.id == *id))
            .collect();
        // Duplicate ids collapse to their lowest requested position so the
        // final numbering stays a compact 0..n-1.
        let mut requested: Vec<&ReorderEntry> = entries.iter().collect();
        requested.sort_by_key(|e| e.position);
        for entry in requested {
            if order.contains(&entry.id) {
                continue;
            }
            let idx = (entry.position.max(0) as usize).min(order.len());
            order.insert(idx, entry.id);
        }

        for (position, content_item_id) in order.iter().enumerate() {
            sqlx::query(
                "UPDATE queue_entries SET position = $3 \
                 WHERE display_id = $1 AND content_item_id = $2",
            )
            .bind(display_id)
            .bind(content_item_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
