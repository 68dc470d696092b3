//! Content status axes: payment, moderation, display.
//!
//! Each axis is stored as a TEXT column and validated through its own state
//! machine. The three axes are deliberately independent; combined views live
//! in `lifecycle`.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Payment status constants
// ---------------------------------------------------------------------------

/// Checkout opened, payment not yet confirmed.
pub const PAYMENT_PENDING: &str = "pending";
/// Payment confirmed by the payment provider.
pub const PAYMENT_COMPLETED: &str = "completed";
/// Payment returned to the customer after confirmation.
pub const PAYMENT_REFUNDED: &str = "refunded";
/// Checkout abandoned or voided before confirmation.
pub const PAYMENT_CANCELLED: &str = "cancelled";

/// All valid payment statuses.
pub const VALID_PAYMENT_STATUSES: &[&str] = &[
    PAYMENT_PENDING,
    PAYMENT_COMPLETED,
    PAYMENT_REFUNDED,
    PAYMENT_CANCELLED,
];

// ---------------------------------------------------------------------------
// Moderation status constants
// ---------------------------------------------------------------------------

/// Awaiting a moderation verdict.
pub const MODERATION_PENDING: &str = "pending";
/// Cleared for display.
pub const MODERATION_APPROVED: &str = "approved";
/// Refused; `moderation_reason` records why.
pub const MODERATION_REJECTED: &str = "rejected";

/// All valid moderation statuses.
pub const VALID_MODERATION_STATUSES: &[&str] =
    &[MODERATION_PENDING, MODERATION_APPROVED, MODERATION_REJECTED];

// ---------------------------------------------------------------------------
// Display status constants
// ---------------------------------------------------------------------------

/// Not yet eligible for the rotation.
pub const DISPLAY_PENDING: &str = "pending";
/// In the rotation, waiting for its turn.
pub const DISPLAY_QUEUED: &str = "queued";
/// Currently showing (or between repeat plays).
pub const DISPLAY_ACTIVE: &str = "active";
/// Run finished. One-way: completed content never re-enters the rotation.
pub const DISPLAY_COMPLETED: &str = "completed";
/// Removed from the rotation by a moderation rejection.
pub const DISPLAY_REJECTED: &str = "rejected";

/// All valid display statuses.
pub const VALID_DISPLAY_STATUSES: &[&str] = &[
    DISPLAY_PENDING,
    DISPLAY_QUEUED,
    DISPLAY_ACTIVE,
    DISPLAY_COMPLETED,
    DISPLAY_REJECTED,
];

// ---------------------------------------------------------------------------
// Payment axis
// ---------------------------------------------------------------------------

/// Payment status enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => PAYMENT_PENDING,
            Self::Completed => PAYMENT_COMPLETED,
            Self::Refunded => PAYMENT_REFUNDED,
            Self::Cancelled => PAYMENT_CANCELLED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            PAYMENT_PENDING => Ok(Self::Pending),
            PAYMENT_COMPLETED => Ok(Self::Completed),
            PAYMENT_REFUNDED => Ok(Self::Refunded),
            PAYMENT_CANCELLED => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown payment status: '{other}'. Valid statuses: {}",
                VALID_PAYMENT_STATUSES.join(", ")
            ))),
        }
    }

    /// Returns the set of valid target statuses reachable from `self`.
    ///
    /// Refunded and cancelled are terminal. Refunds are only reachable from
    /// completed: money must have changed hands before it can come back.
    pub fn valid_transitions(&self) -> &'static [PaymentStatus] {
        match self {
            Self::Pending => &[Self::Completed, Self::Cancelled],
            Self::Completed => &[Self::Refunded],
            Self::Refunded | Self::Cancelled => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is valid.
    pub fn can_transition(&self, to: PaymentStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a transition, returning a validation error for invalid ones.
    pub fn validate_transition(&self, to: PaymentStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Invalid payment transition: {} -> {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Moderation axis
// ---------------------------------------------------------------------------

/// Moderation status enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => MODERATION_PENDING,
            Self::Approved => MODERATION_APPROVED,
            Self::Rejected => MODERATION_REJECTED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            MODERATION_PENDING => Ok(Self::Pending),
            MODERATION_APPROVED => Ok(Self::Approved),
            MODERATION_REJECTED => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown moderation status: '{other}'. Valid statuses: {}",
                VALID_MODERATION_STATUSES.join(", ")
            ))),
        }
    }

    /// Returns the set of valid target statuses reachable from `self`.
    ///
    /// Approved content can still be rejected (operator takedown); rejected
    /// is terminal.
    pub fn valid_transitions(&self) -> &'static [ModerationStatus] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::Rejected],
            Self::Rejected => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is valid.
    pub fn can_transition(&self, to: ModerationStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a transition, returning a validation error for invalid ones.
    pub fn validate_transition(&self, to: ModerationStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Invalid moderation transition: {} -> {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Display axis
// ---------------------------------------------------------------------------

/// Display status enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Pending,
    Queued,
    Active,
    Completed,
    Rejected,
}

impl DisplayStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => DISPLAY_PENDING,
            Self::Queued => DISPLAY_QUEUED,
            Self::Active => DISPLAY_ACTIVE,
            Self::Completed => DISPLAY_COMPLETED,
            Self::Rejected => DISPLAY_REJECTED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            DISPLAY_PENDING => Ok(Self::Pending),
            DISPLAY_QUEUED => Ok(Self::Queued),
            DISPLAY_ACTIVE => Ok(Self::Active),
            DISPLAY_COMPLETED => Ok(Self::Completed),
            DISPLAY_REJECTED => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown display status: '{other}'. Valid statuses: {}",
                VALID_DISPLAY_STATUSES.join(", ")
            ))),
        }
    }

    /// Returns the set of valid target statuses reachable from `self`.
    ///
    /// Completed and rejected are terminal: a finished run never re-enters
    /// the rotation, it gets re-uploaded instead.
    pub fn valid_transitions(&self) -> &'static [DisplayStatus] {
        match self {
            Self::Pending => &[Self::Queued, Self::Rejected],
            Self::Queued => &[Self::Active, Self::Completed, Self::Rejected],
            Self::Active => &[Self::Queued, Self::Completed, Self::Rejected],
            Self::Completed | Self::Rejected => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is valid.
    pub fn can_transition(&self, to: DisplayStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a transition, returning a validation error for invalid ones.
    pub fn validate_transition(&self, to: DisplayStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Invalid display transition: {} -> {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }

    /// Whether content in this status sits in the visible rotation.
    pub fn in_rotation(&self) -> bool {
        matches!(self, Self::Queued | Self::Active)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
