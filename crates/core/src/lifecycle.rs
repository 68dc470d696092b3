//! Unified content lifecycle state.
//!
//! The three status axes in `status` are what the database stores; this
//! module folds them (plus the schedule window) into one tagged state so
//! handlers gate operations against a single value instead of hand-checking
//! axis combinations.

use crate::error::CoreError;
use crate::status::{DisplayStatus, ModerationStatus, PaymentStatus};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Completion causes
// ---------------------------------------------------------------------------

/// Paid single-play content finished its one showing.
pub const CAUSE_PAID_SINGLE_PLAY: &str = "paid_single_play";
/// Play count reached the cap with auto-complete set.
pub const CAUSE_PLAY_CAP: &str = "play_cap";
/// Schedule window elapsed and the sweeper retired the item.
pub const CAUSE_SCHEDULE_EXPIRED: &str = "schedule_expired";
/// An operator completed the item by hand.
pub const CAUSE_MANUAL: &str = "manual";

/// All valid completion causes.
pub const VALID_COMPLETION_CAUSES: &[&str] = &[
    CAUSE_PAID_SINGLE_PLAY,
    CAUSE_PLAY_CAP,
    CAUSE_SCHEDULE_EXPIRED,
    CAUSE_MANUAL,
];

/// Why a content item reached `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionCause {
    PaidSinglePlay,
    PlayCap,
    ScheduleExpired,
    Manual,
}

impl CompletionCause {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaidSinglePlay => CAUSE_PAID_SINGLE_PLAY,
            Self::PlayCap => CAUSE_PLAY_CAP,
            Self::ScheduleExpired => CAUSE_SCHEDULE_EXPIRED,
            Self::Manual => CAUSE_MANUAL,
        }
    }

    /// Parse from a string, returning an error for unknown causes.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            CAUSE_PAID_SINGLE_PLAY => Ok(Self::PaidSinglePlay),
            CAUSE_PLAY_CAP => Ok(Self::PlayCap),
            CAUSE_SCHEDULE_EXPIRED => Ok(Self::ScheduleExpired),
            CAUSE_MANUAL => Ok(Self::Manual),
            other => Err(CoreError::Validation(format!(
                "Unknown completion cause: '{other}'. Valid causes: {}",
                VALID_COMPLETION_CAUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Unified state
// ---------------------------------------------------------------------------

/// Axis snapshot a lifecycle state is derived from.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub payment: PaymentStatus,
    pub moderation: ModerationStatus,
    pub display: DisplayStatus,
    pub is_admin_content: bool,
    pub moderation_reason: Option<String>,
    pub completion_cause: Option<CompletionCause>,
    pub scheduled_start: Option<Timestamp>,
    pub scheduled_end: Option<Timestamp>,
}

/// One tagged view over the three status axes plus the schedule window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    /// Created, cleared of payment and moderation, not yet in the rotation.
    Draft,
    /// Waiting on the payment collaborator.
    PendingPayment,
    /// Waiting on a moderation verdict.
    PendingModeration,
    /// Refused by moderation or pulled from the rotation.
    Rejected { reason: Option<String> },
    /// In the rotation with a schedule window that has not opened yet.
    Scheduled {
        start: Timestamp,
        end: Option<Timestamp>,
    },
    /// In the rotation and eligible now.
    Active,
    /// Run finished. Terminal.
    Completed { cause: Option<CompletionCause> },
}

impl ContentState {
    /// Fold an axis snapshot into the unified state.
    ///
    /// Precedence: rejection beats completion beats the pending axes beats
    /// rotation membership. Payment gates before moderation because customers
    /// pay before the moderation verdict lands; admin content skips both.
    pub fn derive(snapshot: &StatusSnapshot, now: Timestamp) -> ContentState {
        if snapshot.moderation == ModerationStatus::Rejected
            || snapshot.display == DisplayStatus::Rejected
        {
            return ContentState::Rejected {
                reason: snapshot.moderation_reason.clone(),
            };
        }
        if snapshot.display == DisplayStatus::Completed {
            return ContentState::Completed {
                cause: snapshot.completion_cause,
            };
        }
        if !snapshot.is_admin_content {
            if snapshot.payment == PaymentStatus::Pending {
                return ContentState::PendingPayment;
            }
            if snapshot.moderation == ModerationStatus::Pending {
                return ContentState::PendingModeration;
            }
        }
        if snapshot.display.in_rotation() {
            if let Some(start) = snapshot.scheduled_start {
                if now < start {
                    return ContentState::Scheduled {
                        start,
                        end: snapshot.scheduled_end,
                    };
                }
            }
            return ContentState::Active;
        }
        ContentState::Draft
    }

    /// Terminal states accept no further lifecycle mutations.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Completed { .. })
    }

    /// Whether a moderation verdict may still be applied.
    pub fn accepts_moderation(&self) -> bool {
        !matches!(self, Self::Completed { .. })
    }

    /// Whether a play report makes sense for this state.
    ///
    /// Only rotation members play; a report against anything else means the
    /// kiosk raced a removal and the caller should treat it as a conflict.
    pub fn accepts_play(&self) -> bool {
        matches!(self, Self::Scheduled { .. } | Self::Active)
    }

    /// Whether the schedule window may still be rewritten.
    pub fn accepts_schedule_change(&self) -> bool {
        !self.is_terminal()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
