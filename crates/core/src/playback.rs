//! Play-outcome policy.
//!
//! Decides what a recorded play does to an item: nothing, advisory cap, or
//! completion. Pure logic; the repository applies the verdict.

use crate::lifecycle::CompletionCause;
use crate::types::{DbId, Timestamp};

/// Cap applied when an item carries no explicit `max_plays`.
pub const DEFAULT_MAX_PLAYS: i32 = 10;

/// The slice of an item the play policy looks at.
#[derive(Debug, Clone, Copy)]
pub struct PlayPolicyInput {
    pub is_admin_content: bool,
    pub pricing_option_id: Option<DbId>,
    pub scheduled_start: Option<Timestamp>,
    pub scheduled_end: Option<Timestamp>,
    pub repeat_frequency_per_day: i32,
    pub timer_loop_enabled: bool,
    pub auto_complete_after_play: bool,
    pub max_plays: Option<i32>,
}

impl PlayPolicyInput {
    /// Whether the item is configured to show more than once.
    ///
    /// A schedule window, a timer loop, or a per-day frequency above one all
    /// mean the item belongs to the repeat class and is exempt from the
    /// single-play rule.
    pub fn has_repeat_schedule(&self) -> bool {
        self.scheduled_start.is_some()
            || self.scheduled_end.is_some()
            || self.timer_loop_enabled
            || self.repeat_frequency_per_day > 1
    }

    /// The cap in force for this item.
    pub fn effective_max_plays(&self) -> i32 {
        self.max_plays.unwrap_or(DEFAULT_MAX_PLAYS)
    }
}

/// Verdict for one recorded play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Play count is at or past the cap. Advisory unless completion fires.
    pub reached_cap: bool,
    /// Terminal transition the play triggered, if any.
    pub completion: Option<CompletionCause>,
}

impl PlayOutcome {
    /// Whether the single-play rule retired the item.
    pub fn auto_deleted(&self) -> bool {
        self.completion == Some(CompletionCause::PaidSinglePlay)
    }
}

/// Evaluate the policy after the count has been bumped to `play_count`.
///
/// Paid one-shot content (priced, non-admin, no repeat schedule) completes
/// on its first play. Repeat content completes at the cap only when
/// `auto_complete_after_play` asks for it; admin content never completes
/// from playback.
pub fn evaluate_play(input: &PlayPolicyInput, play_count: i32) -> PlayOutcome {
    let reached_cap = play_count >= input.effective_max_plays();

    let completion = if input.pricing_option_id.is_some()
        && !input.is_admin_content
        && !input.has_repeat_schedule()
        && play_count >= 1
    {
        Some(CompletionCause::PaidSinglePlay)
    } else if reached_cap && input.auto_complete_after_play && !input.is_admin_content {
        Some(CompletionCause::PlayCap)
    } else {
        None
    };

    PlayOutcome {
        reached_cap,
        completion,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn paid_one_shot() -> PlayPolicyInput {
        PlayPolicyInput {
            is_admin_content: false,
            pricing_option_id: Some(3),
            scheduled_start: None,
            scheduled_end: None,
            repeat_frequency_per_day: 1,
            timer_loop_enabled: false,
            auto_complete_after_play: false,
            max_plays: None,
        }
    }

    // -- single-play rule -----------------------------------------------------

    #[test]
    fn paid_one_shot_completes_on_first_play() {
        let outcome = evaluate_play(&paid_one_shot(), 1);
        assert_eq!(outcome.completion, Some(CompletionCause::PaidSinglePlay));
        assert!(outcome.auto_deleted());
        assert!(!outcome.reached_cap);
    }

    #[test]
    fn admin_content_exempt_from_single_play() {
        let mut input = paid_one_shot();
        input.is_admin_content = true;
        let outcome = evaluate_play(&input, 1);
        assert_eq!(outcome.completion, None);
        assert!(!outcome.auto_deleted());
    }

    #[test]
    fn unpaid_content_exempt_from_single_play() {
        let mut input = paid_one_shot();
        input.pricing_option_id = None;
        let outcome = evaluate_play(&input, 1);
        assert_eq!(outcome.completion, None);
    }

    #[test]
    fn scheduled_content_exempt_from_single_play() {
        let mut input = paid_one_shot();
        input.scheduled_start = Some(Utc::now());
        let outcome = evaluate_play(&input, 5);
        assert_eq!(outcome.completion, None);
    }

    #[test]
    fn timer_loop_content_exempt_from_single_play() {
        let mut input = paid_one_shot();
        input.timer_loop_enabled = true;
        let outcome = evaluate_play(&input, 2);
        assert_eq!(outcome.completion, None);
    }

    #[test]
    fn per_day_repeat_exempt_from_single_play() {
        let mut input = paid_one_shot();
        input.repeat_frequency_per_day = 4;
        let outcome = evaluate_play(&input, 2);
        assert_eq!(outcome.completion, None);
    }

    // -- cap rule -------------------------------------------------------------

    #[test]
    fn default_cap_is_ten() {
        let mut input = paid_one_shot();
        input.pricing_option_id = None;
        assert!(!evaluate_play(&input, 9).reached_cap);
        assert!(evaluate_play(&input, 10).reached_cap);
    }

    #[test]
    fn explicit_cap_overrides_default() {
        let mut input = paid_one_shot();
        input.pricing_option_id = None;
        input.max_plays = Some(3);
        assert!(evaluate_play(&input, 3).reached_cap);
        assert!(!evaluate_play(&input, 2).reached_cap);
    }

    #[test]
    fn cap_alone_is_advisory() {
        let mut input = paid_one_shot();
        input.pricing_option_id = None;
        input.max_plays = Some(3);
        let outcome = evaluate_play(&input, 3);
        assert!(outcome.reached_cap);
        assert_eq!(outcome.completion, None);
    }

    #[test]
    fn cap_completes_when_auto_complete_set() {
        let mut input = paid_one_shot();
        input.repeat_frequency_per_day = 4;
        input.auto_complete_after_play = true;
        input.max_plays = Some(3);
        let outcome = evaluate_play(&input, 3);
        assert!(outcome.reached_cap);
        assert_eq!(outcome.completion, Some(CompletionCause::PlayCap));
        assert!(!outcome.auto_deleted());
    }

    #[test]
    fn admin_content_caps_without_completing() {
        let mut input = paid_one_shot();
        input.is_admin_content = true;
        input.auto_complete_after_play = true;
        input.max_plays = Some(10);
        let outcome = evaluate_play(&input, 10);
        assert!(outcome.reached_cap);
        assert_eq!(outcome.completion, None);
    }

    #[test]
    fn single_play_wins_over_cap_cause() {
        let mut input = paid_one_shot();
        input.auto_complete_after_play = true;
        input.max_plays = Some(1);
        let outcome = evaluate_play(&input, 1);
        assert!(outcome.reached_cap);
        assert_eq!(outcome.completion, Some(CompletionCause::PaidSinglePlay));
    }

    // -- repeat classification ------------------------------------------------

    #[test]
    fn bare_item_is_not_repeat() {
        assert!(!paid_one_shot().has_repeat_schedule());
    }

    #[test]
    fn end_only_window_counts_as_repeat_class() {
        let mut input = paid_one_shot();
        input.scheduled_end = Some(Utc::now());
        assert!(input.has_repeat_schedule());
    }
}
