//! Validated scheduling configuration.
//!
//! Every recognized scheduling option lives here as a typed field, checked
//! at the write boundary. Repositories only ever see a config that passed
//! `validate`, so malformed windows and contradictory repeat modes never
//! reach the database.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Per-day repeat frequency when none is supplied.
pub const DEFAULT_REPEAT_FREQUENCY_PER_DAY: i32 = 1;

/// Highest accepted per-day repeat frequency (one play per quarter hour).
pub const MAX_REPEAT_FREQUENCY_PER_DAY: i32 = 96;

/// Longest accepted timer loop interval (one day).
pub const MAX_TIMER_LOOP_MINUTES: i32 = 1440;

/// Shortest accepted per-photo duration.
pub const MIN_CUSTOM_DURATION_SECS: i32 = 1;

/// Longest accepted per-photo duration (one hour).
pub const MAX_CUSTOM_DURATION_SECS: i32 = 3600;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Scheduling options for one content item.
///
/// Unknown fields are rejected at deserialization so a misspelled option
/// fails loudly instead of silently doing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub scheduled_start: Option<Timestamp>,
    #[serde(default)]
    pub scheduled_end: Option<Timestamp>,
    #[serde(default)]
    pub auto_delete_after_end: bool,
    #[serde(default = "default_repeat_frequency")]
    pub repeat_frequency_per_day: i32,
    #[serde(default)]
    pub timer_loop_enabled: bool,
    #[serde(default)]
    pub timer_loop_minutes: Option<i32>,
    #[serde(default)]
    pub custom_duration_secs: Option<i32>,
}

fn default_repeat_frequency() -> i32 {
    DEFAULT_REPEAT_FREQUENCY_PER_DAY
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            scheduled_start: None,
            scheduled_end: None,
            auto_delete_after_end: false,
            repeat_frequency_per_day: DEFAULT_REPEAT_FREQUENCY_PER_DAY,
            timer_loop_enabled: false,
            timer_loop_minutes: None,
            custom_duration_secs: None,
        }
    }
}

impl ScheduleConfig {
    /// Check every field and combination rule.
    pub fn validate(&self) -> Result<(), CoreError> {
        match (self.scheduled_start, self.scheduled_end) {
            (Some(start), Some(end)) if end <= start => {
                return Err(CoreError::Validation(
                    "Schedule window end must be after start".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(CoreError::Validation(
                    "Schedule window end requires a start".to_string(),
                ));
            }
            _ => {}
        }

        if self.auto_delete_after_end && self.scheduled_end.is_none() {
            return Err(CoreError::Validation(
                "auto_delete_after_end requires a schedule window end".to_string(),
            ));
        }

        if self.repeat_frequency_per_day < 1 {
            return Err(CoreError::Validation(
                "repeat_frequency_per_day must be at least 1".to_string(),
            ));
        }
        if self.repeat_frequency_per_day > MAX_REPEAT_FREQUENCY_PER_DAY {
            return Err(CoreError::Validation(format!(
                "repeat_frequency_per_day must not exceed {MAX_REPEAT_FREQUENCY_PER_DAY}"
            )));
        }

        match (self.timer_loop_enabled, self.timer_loop_minutes) {
            (true, None) => {
                return Err(CoreError::Validation(
                    "timer_loop_minutes is required when the timer loop is enabled".to_string(),
                ));
            }
            (true, Some(minutes)) if !(1..=MAX_TIMER_LOOP_MINUTES).contains(&minutes) => {
                return Err(CoreError::Validation(format!(
                    "timer_loop_minutes must be between 1 and {MAX_TIMER_LOOP_MINUTES}"
                )));
            }
            (false, Some(_)) => {
                return Err(CoreError::Validation(
                    "timer_loop_minutes requires the timer loop to be enabled".to_string(),
                ));
            }
            _ => {}
        }

        if self.timer_loop_enabled && self.repeat_frequency_per_day > 1 {
            return Err(CoreError::Validation(
                "Per-day repeat and timer loop are alternative repeat modes; set one".to_string(),
            ));
        }

        if let Some(secs) = self.custom_duration_secs {
            if !(MIN_CUSTOM_DURATION_SECS..=MAX_CUSTOM_DURATION_SECS).contains(&secs) {
                return Err(CoreError::Validation(format!(
                    "custom_duration_secs must be between {MIN_CUSTOM_DURATION_SECS} and {MAX_CUSTOM_DURATION_SECS}"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
