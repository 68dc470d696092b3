//! Periodic expiry sweep.
//!
//! Retires content whose schedule window closed with auto-delete set:
//! marks it completed, removes its queue membership, and compacts the
//! affected displays' positions. The pass is idempotent; a re-run finds an
//! empty batch because the completion guard excludes terminal rows.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use showyo_core::types::{DbId, Timestamp};
use showyo_db::repositories::{ContentItemRepo, QueueRepo};
use showyo_db::DbPool;

/// Sweep cadence when `SWEEP_INTERVAL_SECS` is unset.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Run one expiry sweep at `now`. Returns the number of items retired.
///
/// Ordering matters: the completion write commits first, then queue
/// membership goes. If a dequeue fails mid-batch the completed status
/// stands and the next pass has nothing left to complete, so the queue
/// cleanup is retried only for rows still queued.
pub async fn sweep_once(pool: &DbPool, now: Timestamp) -> Result<u64, sqlx::Error> {
    let swept = ContentItemRepo::sweep_expired(pool, now).await?;
    if swept.is_empty() {
        return Ok(0);
    }

    let mut affected_displays: BTreeSet<DbId> = BTreeSet::new();
    for item in &swept {
        if let Some(display_id) = QueueRepo::dequeue(pool, item.id).await? {
            affected_displays.insert(display_id);
        }
        tracing::info!(
            content_id = item.id,
            display_id = item.display_id,
            "Content retired by expiry sweep"
        );
    }

    // One compaction pass per display that lost members.
    for display_id in affected_displays {
        QueueRepo::renumber(pool, display_id).await?;
    }

    Ok(swept.len() as u64)
}

// ---------------------------------------------------------------------------
// Sweeper loop
// ---------------------------------------------------------------------------

/// Background service driving [`sweep_once`] on a fixed interval.
pub struct Sweeper {
    pool: DbPool,
    interval: Duration,
}

impl Sweeper {
    /// Create a sweeper with the given cadence.
    pub fn new(pool: DbPool, interval: Duration) -> Self {
        Self { pool, interval }
    }

    /// Run the sweep loop until the token is cancelled.
    ///
    /// A failed pass is logged and retried on the next tick; the loop never
    /// dies on a transient database error.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Expiry sweeper cancelled");
                    break;
                }
                _ = interval.tick() => {
                    match sweep_once(&self.pool, Utc::now()).await {
                        Ok(0) => {}
                        Ok(swept) => {
                            tracing::info!(swept, "Expiry sweep pass finished");
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Expiry sweep pass failed");
                        }
                    }
                }
            }
        }
    }
}
