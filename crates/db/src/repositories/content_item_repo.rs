//! Repository for the `content_items` table.
//!
//! Status axes move only through compare-and-set updates guarded by the
//! current value, so a lost race surfaces as `false` instead of silently
//! overwriting a concurrent transition. No status literal appears inline;
//! everything binds the constants from `showyo_core::status`.

use sqlx::PgPool;

use showyo_core::lifecycle::CompletionCause;
use showyo_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use showyo_core::schedule::ScheduleConfig;
use showyo_core::status::{
    DisplayStatus, ModerationStatus, PaymentStatus, DISPLAY_COMPLETED, DISPLAY_PENDING,
    DISPLAY_QUEUED, DISPLAY_REJECTED, MODERATION_APPROVED, MODERATION_PENDING, MODERATION_REJECTED,
    PAYMENT_COMPLETED, PAYMENT_PENDING,
};
use showyo_core::types::{DbId, Timestamp};

use crate::models::content_item::{
    ContentItem, ContentItemUpdate, ContentListQuery, DeletedContentItem, NewContentItem,
    SweptItem,
};
use crate::models::display::DEFAULT_DISPLAY_ID;
use crate::models::play_history::PlayHistoryEntry;
use crate::repositories::play_history_repo;

/// Column list for `content_items` queries.
const COLUMNS: &str = "\
    id, display_id, file_name, content_type, storage_path, checksum_sha256, \
    media_duration_secs, custom_duration_secs, border_id, \
    customer_email, price_cents, currency, pricing_option_id, is_admin_content, \
    payment_status, moderation_status, display_status, moderation_reason, \
    scheduled_start, scheduled_end, auto_delete_after_end, \
    repeat_frequency_per_day, timer_loop_enabled, timer_loop_minutes, \
    play_count, max_plays, auto_complete_after_play, last_played_at, \
    completed_at, completion_cause, system_completed, \
    created_at, updated_at";

/// Provides CRUD and lifecycle operations for billboard content.
pub struct ContentItemRepo;

impl ContentItemRepo {
    /// Register an uploaded item.
    ///
    /// Customer uploads start fully pending. Admin uploads skip payment and
    /// moderation and are born queue-eligible; the caller still has to
    /// enqueue them.
    pub async fn create(
        pool: &PgPool,
        input: &NewContentItem,
        is_admin: bool,
    ) -> Result<ContentItem, sqlx::Error> {
        let (payment, moderation, display) = if is_admin {
            (PAYMENT_COMPLETED, MODERATION_APPROVED, DISPLAY_QUEUED)
        } else {
            (PAYMENT_PENDING, MODERATION_PENDING, DISPLAY_PENDING)
        };

        let query = format!(
            "INSERT INTO content_items \
                 (display_id, file_name, content_type, storage_path, checksum_sha256, \
                  media_duration_secs, border_id, customer_email, price_cents, currency, \
                  pricing_option_id, is_admin_content, \
                  payment_status, moderation_status, display_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(input.display_id.unwrap_or(DEFAULT_DISPLAY_ID))
            .bind(&input.file_name)
            .bind(&input.content_type)
            .bind(&input.storage_path)
            .bind(&input.checksum_sha256)
            .bind(input.media_duration_secs)
            .bind(input.border_id)
            .bind(&input.customer_email)
            .bind(input.price_cents)
            .bind(input.currency.as_deref().unwrap_or("usd"))
            .bind(input.pricing_option_id)
            .bind(is_admin)
            .bind(payment)
            .bind(moderation)
            .bind(display)
            .fetch_one(pool)
            .await
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_items WHERE id = $1");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items with optional per-axis status filters and pagination.
    pub async fn list(
        pool: &PgPool,
        params: &ContentListQuery,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(params.offset);

        // Build the WHERE clause and track the next bind parameter index.
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx: u32 = 1;

        if params.payment_status.is_some() {
            conditions.push(format!("payment_status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.moderation_status.is_some() {
            conditions.push(format!("moderation_status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.display_status.is_some() {
            conditions.push(format!("display_status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.display_id.is_some() {
            conditions.push(format!("display_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.is_admin_content.is_some() {
            conditions.push(format!("is_admin_content = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM content_items \
             {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, ContentItem>(&query);

        if let Some(s) = &params.payment_status {
            q = q.bind(s);
        }
        if let Some(s) = &params.moderation_status {
            q = q.bind(s);
        }
        if let Some(s) = &params.display_status {
            q = q.bind(s);
        }
        if let Some(d) = params.display_id {
            q = q.bind(d);
        }
        if let Some(a) = params.is_admin_content {
            q = q.bind(a);
        }

        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Partial field update. Unset DTO fields keep their current value.
    ///
    /// Status axes are not touched here; they go through the guarded
    /// transition methods below.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ContentItemUpdate,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items SET \
                 file_name = COALESCE($2, file_name), \
                 storage_path = COALESCE($3, storage_path), \
                 checksum_sha256 = COALESCE($4, checksum_sha256), \
                 media_duration_secs = COALESCE($5, media_duration_secs), \
                 border_id = COALESCE($6, border_id), \
                 customer_email = COALESCE($7, customer_email), \
                 price_cents = COALESCE($8, price_cents), \
                 currency = COALESCE($9, currency), \
                 pricing_option_id = COALESCE($10, pricing_option_id), \
                 max_plays = COALESCE($11, max_plays), \
                 auto_complete_after_play = COALESCE($12, auto_complete_after_play) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(&input.file_name)
            .bind(&input.storage_path)
            .bind(&input.checksum_sha256)
            .bind(input.media_duration_secs)
            .bind(input.border_id)
            .bind(&input.customer_email)
            .bind(input.price_cents)
            .bind(&input.currency)
            .bind(input.pricing_option_id)
            .bind(input.max_plays)
            .bind(input.auto_complete_after_play)
            .fetch_optional(pool)
            .await
    }

    /// Replace the schedule wholesale with a validated config.
    ///
    /// Deliberately not COALESCE: clearing the window is a legitimate
    /// outcome of applying an empty config.
    pub async fn apply_schedule(
        pool: &PgPool,
        id: DbId,
        config: &ScheduleConfig,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items SET \
                 scheduled_start = $2, \
                 scheduled_end = $3, \
                 auto_delete_after_end = $4, \
                 repeat_frequency_per_day = $5, \
                 timer_loop_enabled = $6, \
                 timer_loop_minutes = $7, \
                 custom_duration_secs = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(config.scheduled_start)
            .bind(config.scheduled_end)
            .bind(config.auto_delete_after_end)
            .bind(config.repeat_frequency_per_day)
            .bind(config.timer_loop_enabled)
            .bind(config.timer_loop_minutes)
            .bind(config.custom_duration_secs)
            .fetch_optional(pool)
            .await
    }

    // ── status transitions ─────────────────────────────────────────────────

    /// Move the payment axis, guarded by the expected current value.
    ///
    /// Returns `false` when the row is absent or the axis moved underneath
    /// the caller.
    pub async fn transition_payment(
        pool: &PgPool,
        id: DbId,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_items SET payment_status = $3 \
             WHERE id = $1 AND payment_status = $2",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move the display axis, guarded by the expected current value.
    pub async fn transition_display(
        pool: &PgPool,
        id: DbId,
        from: DisplayStatus,
        to: DisplayStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_items SET display_status = $3 \
             WHERE id = $1 AND display_status = $2",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Approve a pending item: moderation approved, display queued.
    ///
    /// Both axes are guarded so an approval can only land on an item that
    /// is still fully pending.
    pub async fn approve_moderation(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_items \
             SET moderation_status = $2, display_status = $3, moderation_reason = NULL \
             WHERE id = $1 AND moderation_status = $4 AND display_status = $5",
        )
        .bind(id)
        .bind(MODERATION_APPROVED)
        .bind(DISPLAY_QUEUED)
        .bind(MODERATION_PENDING)
        .bind(DISPLAY_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reject an item with a reason: both axes go to rejected.
    ///
    /// Works from pending (moderation verdict) and from approved
    /// (operator takedown); the caller validates the transition first.
    pub async fn reject_moderation(
        pool: &PgPool,
        id: DbId,
        reason: &str,
        from: ModerationStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_items \
             SET moderation_status = $3, display_status = $4, moderation_reason = $5 \
             WHERE id = $1 AND moderation_status = $2 AND display_status <> $4",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(MODERATION_REJECTED)
        .bind(DISPLAY_REJECTED)
        .bind(reason)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One-way completion: set the cause and stamp the time.
    ///
    /// Guarded against terminal states so re-running (sweep races, double
    /// play reports) is a no-op.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        cause: CompletionCause,
        system_completed: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_items \
             SET display_status = $2, completed_at = NOW(), \
                 completion_cause = $3, system_completed = $4 \
             WHERE id = $1 AND display_status NOT IN ($2, $5)",
        )
        .bind(id)
        .bind(DISPLAY_COMPLETED)
        .bind(cause.as_str())
        .bind(system_completed)
        .bind(DISPLAY_REJECTED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── playback ───────────────────────────────────────────────────────────

    /// Durably record one play: bump the counter and append the history row
    /// in a single transaction.
    ///
    /// Any follow-up mutation (auto-delete, cap completion) happens outside
    /// this call and must never roll it back. Returns `None` when the item
    /// is absent.
    pub async fn record_play(
        pool: &PgPool,
        id: DbId,
        started_at: Timestamp,
        completed_at: Timestamp,
    ) -> Result<Option<(ContentItem, PlayHistoryEntry)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update = format!(
            "UPDATE content_items \
             SET play_count = play_count + 1, last_played_at = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let Some(item) = sqlx::query_as::<_, ContentItem>(&update)
            .bind(id)
            .bind(completed_at)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let insert = format!(
            "INSERT INTO play_history \
                 (content_item_id, display_id, customer_email, pricing_option_id, \
                  file_name, storage_path, price_cents, currency, play_number, \
                  started_at, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {}",
            play_history_repo::COLUMNS
        );
        let entry = sqlx::query_as::<_, PlayHistoryEntry>(&insert)
            .bind(item.id)
            .bind(item.display_id)
            .bind(&item.customer_email)
            .bind(item.pricing_option_id)
            .bind(&item.file_name)
            .bind(&item.storage_path)
            .bind(item.price_cents)
            .bind(&item.currency)
            .bind(item.play_count)
            .bind(started_at)
            .bind(completed_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((item, entry)))
    }

    // ── expiry sweep ───────────────────────────────────────────────────────

    /// Retire every item whose window closed with auto-delete set.
    ///
    /// Idempotent: the guard excludes terminal rows, so a re-run returns an
    /// empty batch.
    pub async fn sweep_expired(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<SweptItem>, sqlx::Error> {
        sqlx::query_as::<_, SweptItem>(
            "UPDATE content_items \
             SET display_status = $2, completed_at = NOW(), \
                 completion_cause = $3, system_completed = TRUE \
             WHERE auto_delete_after_end \
               AND scheduled_end IS NOT NULL \
               AND scheduled_end < $1 \
               AND display_status NOT IN ($2, $4) \
             RETURNING id, display_id",
        )
        .bind(now)
        .bind(DISPLAY_COMPLETED)
        .bind(CompletionCause::ScheduleExpired.as_str())
        .bind(DISPLAY_REJECTED)
        .fetch_all(pool)
        .await
    }

    // ── deletion ───────────────────────────────────────────────────────────

    /// Hard-delete an item. Queue membership cascades away; play history
    /// keeps its denormalized rows. Returns what the caller needs to
    /// cascade: the display to renumber and the media object to remove.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeletedContentItem>, sqlx::Error> {
        sqlx::query_as::<_, DeletedContentItem>(
            "DELETE FROM content_items WHERE id = $1 RETURNING display_id, storage_path",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
