//! Visibility evaluation for queue assembly.
//!
//! Pure decision table over display status and the schedule window. Callers
//! supply `now`; nothing here polls or caches, so the same inputs always
//! produce the same verdict.

use serde::Serialize;

use crate::status::DisplayStatus;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Verdict types
// ---------------------------------------------------------------------------

/// Why an item is (or is not) visible right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityReason {
    /// Display status still pending; moderation or payment has not landed.
    Pending,
    /// Schedule window has closed.
    Expired,
    /// Schedule window has not opened yet.
    Scheduled,
    /// Schedule window is open.
    Published,
    /// No schedule window; showing because the item is active.
    Active,
    /// Eligible by status but not by schedule shape.
    Hidden,
}

/// Visibility verdict for one item at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub visible: bool,
    pub reason: VisibilityReason,
    /// Whole minutes until the window closes. Only set for published items
    /// with an end bound.
    pub expires_in_minutes: Option<i64>,
}

impl Visibility {
    fn hidden(reason: VisibilityReason) -> Self {
        Self {
            visible: false,
            reason,
            expires_in_minutes: None,
        }
    }
}

/// The slice of an item the evaluator looks at.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityInput {
    pub display_status: DisplayStatus,
    pub scheduled_start: Option<Timestamp>,
    pub scheduled_end: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Decide whether an item should be on screen at `now`.
///
/// Precedence is load-bearing: expiry dominates a started window, a future
/// start dominates activity, and an item whose start has passed stays
/// visible forever when no end is set. An end bound alone (no start) never
/// shows the item.
pub fn evaluate(input: &VisibilityInput, now: Timestamp) -> Visibility {
    if input.display_status == DisplayStatus::Pending {
        return Visibility::hidden(VisibilityReason::Pending);
    }

    if let Some(end) = input.scheduled_end {
        if now > end {
            return Visibility::hidden(VisibilityReason::Expired);
        }
    }

    if let Some(start) = input.scheduled_start {
        if now < start {
            return Visibility::hidden(VisibilityReason::Scheduled);
        }
        return Visibility {
            visible: true,
            reason: VisibilityReason::Published,
            expires_in_minutes: input.scheduled_end.map(|end| minutes_until(end, now)),
        };
    }

    if input.scheduled_end.is_none() && input.display_status == DisplayStatus::Active {
        return Visibility {
            visible: true,
            reason: VisibilityReason::Active,
            expires_in_minutes: None,
        };
    }

    Visibility::hidden(VisibilityReason::Hidden)
}

/// Whole minutes from `now` until `end`, floored.
fn minutes_until(end: Timestamp, now: Timestamp) -> i64 {
    (end - now).num_minutes()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 15, hour, 0, 0).unwrap()
    }

    fn input(
        display_status: DisplayStatus,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> VisibilityInput {
        VisibilityInput {
            display_status,
            scheduled_start: start,
            scheduled_end: end,
        }
    }

    // -- rule 1: pending always hides -----------------------------------------

    #[test]
    fn pending_hides_even_inside_open_window() {
        let v = evaluate(
            &input(DisplayStatus::Pending, Some(at(8)), Some(at(20))),
            at(12),
        );
        assert!(!v.visible);
        assert_eq!(v.reason, VisibilityReason::Pending);
    }

    // -- rule 2: expiry dominates ---------------------------------------------

    #[test]
    fn past_end_is_expired() {
        let v = evaluate(
            &input(DisplayStatus::Queued, Some(at(8)), Some(at(10))),
            at(12),
        );
        assert!(!v.visible);
        assert_eq!(v.reason, VisibilityReason::Expired);
    }

    #[test]
    fn expiry_wins_over_started_window() {
        // Start has passed too; expiry must still win.
        let v = evaluate(
            &input(DisplayStatus::Active, Some(at(8)), Some(at(10))),
            at(11),
        );
        assert_eq!(v.reason, VisibilityReason::Expired);
    }

    #[test]
    fn exactly_at_end_is_not_expired() {
        let v = evaluate(
            &input(DisplayStatus::Queued, Some(at(8)), Some(at(12))),
            at(12),
        );
        assert!(v.visible);
        assert_eq!(v.reason, VisibilityReason::Published);
        assert_eq!(v.expires_in_minutes, Some(0));
    }

    // -- rule 3: future start -------------------------------------------------

    #[test]
    fn future_start_is_scheduled() {
        let v = evaluate(
            &input(DisplayStatus::Queued, Some(at(14)), Some(at(20))),
            at(12),
        );
        assert!(!v.visible);
        assert_eq!(v.reason, VisibilityReason::Scheduled);
    }

    // -- rule 4: started window is published ----------------------------------

    #[test]
    fn inside_window_is_published() {
        let v = evaluate(
            &input(DisplayStatus::Queued, Some(at(8)), Some(at(20))),
            at(12),
        );
        assert!(v.visible);
        assert_eq!(v.reason, VisibilityReason::Published);
        assert_eq!(v.expires_in_minutes, Some(8 * 60));
    }

    #[test]
    fn started_without_end_is_permanently_visible() {
        let v = evaluate(&input(DisplayStatus::Queued, Some(at(8)), None), at(23));
        assert!(v.visible);
        assert_eq!(v.reason, VisibilityReason::Published);
        assert_eq!(v.expires_in_minutes, None);
    }

    #[test]
    fn exactly_at_start_is_published() {
        let v = evaluate(&input(DisplayStatus::Queued, Some(at(8)), None), at(8));
        assert!(v.visible);
        assert_eq!(v.reason, VisibilityReason::Published);
    }

    #[test]
    fn expires_in_minutes_floors() {
        let start = at(8);
        let end = at(12);
        let now = end - Duration::seconds(90);
        let v = evaluate(&input(DisplayStatus::Queued, Some(start), Some(end)), now);
        assert_eq!(v.expires_in_minutes, Some(1));

        let now = end - Duration::seconds(59);
        let v = evaluate(&input(DisplayStatus::Queued, Some(start), Some(end)), now);
        assert_eq!(v.expires_in_minutes, Some(0));
    }

    // -- rule 5: unscheduled active content -----------------------------------

    #[test]
    fn unscheduled_active_is_visible() {
        let v = evaluate(&input(DisplayStatus::Active, None, None), at(12));
        assert!(v.visible);
        assert_eq!(v.reason, VisibilityReason::Active);
        assert_eq!(v.expires_in_minutes, None);
    }

    // -- rule 6: everything else hides ----------------------------------------

    #[test]
    fn unscheduled_queued_is_hidden() {
        let v = evaluate(&input(DisplayStatus::Queued, None, None), at(12));
        assert!(!v.visible);
        assert_eq!(v.reason, VisibilityReason::Hidden);
    }

    #[test]
    fn end_only_window_never_shows() {
        // An end bound with no start cannot satisfy rule 4 or rule 5.
        let v = evaluate(&input(DisplayStatus::Active, None, Some(at(20))), at(12));
        assert!(!v.visible);
        assert_eq!(v.reason, VisibilityReason::Hidden);
    }

    #[test]
    fn end_only_window_past_end_is_expired() {
        let v = evaluate(&input(DisplayStatus::Active, None, Some(at(10))), at(12));
        assert!(!v.visible);
        assert_eq!(v.reason, VisibilityReason::Expired);
    }

    // -- determinism ----------------------------------------------------------

    #[test]
    fn same_inputs_same_verdict() {
        let i = input(DisplayStatus::Queued, Some(at(8)), Some(at(20)));
        assert_eq!(evaluate(&i, at(12)), evaluate(&i, at(12)));
    }
}
