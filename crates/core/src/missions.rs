//! Daily mission rules (progress arithmetic and catalog validation).
//!
//! Progress rows are keyed by (user, mission, assigned date). A row's
//! progress only moves forward, stops at its target count, and flips to
//! completed exactly once. The experience reward is tied to that single
//! transition, so [`apply_progress`] reports it through
//! [`ProgressOutcome::newly_completed`] and callers credit only then.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::stats::Interaction;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ACTION_FEED: &str = "feed";
pub const ACTION_PLAY: &str = "play";
pub const ACTION_PET: &str = "pet";
pub const ACTION_CHAT: &str = "chat";
pub const ACTION_TOUCH: &str = "touch";
pub const ACTION_WEATHER_CHECK: &str = "weather_check";

/// All valid `target_action` values.
pub const VALID_ACTIONS: &[&str] = &[
    ACTION_FEED,
    ACTION_PLAY,
    ACTION_PET,
    ACTION_CHAT,
    ACTION_TOUCH,
    ACTION_WEATHER_CHECK,
];

pub const TYPE_DAILY: &str = "daily";
pub const TYPE_WEEKLY: &str = "weekly";
pub const TYPE_SPECIAL: &str = "special";

/// All valid `mission_type` values.
pub const VALID_MISSION_TYPES: &[&str] = &[TYPE_DAILY, TYPE_WEEKLY, TYPE_SPECIAL];

/// Largest increment a single progress call may report.
pub const MAX_PROGRESS_INCREMENT: i32 = 100;

/// Largest target count a mission may declare.
pub const MAX_TARGET_COUNT: i32 = 1_000;

/// Largest experience reward a mission may grant.
pub const MAX_REWARD_EXP: i32 = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Outcome of applying an increment to a progress row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressOutcome {
    /// New progress value, never above the target count.
    pub progress: i32,
    /// Whether the row is completed after this update.
    pub is_completed: bool,
    /// True only on the update that crossed the target.
    pub newly_completed: bool,
}

impl ProgressOutcome {
    /// Whether the stored row must be written.
    pub fn changed(&self, previous_progress: i32) -> bool {
        self.newly_completed || self.progress != previous_progress
    }
}

/// Mission fields checked on create and update.
#[derive(Debug, Clone)]
pub struct MissionDraft<'a> {
    pub name: &'a str,
    pub mission_type: &'a str,
    pub target_action: &'a str,
    pub reward_exp: i32,
    pub target_params: Option<&'a serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Mission action matching a mascot interaction.
pub fn action_for_interaction(interaction: Interaction) -> &'static str {
    match interaction {
        Interaction::Feed => ACTION_FEED,
        Interaction::Play => ACTION_PLAY,
        Interaction::Pet => ACTION_PET,
        Interaction::Chat => ACTION_CHAT,
    }
}

/// Derive a mission's target count from its optional `target_params`.
///
/// `{"count": N}` with a positive integer `N` yields `N` (capped at
/// [`MAX_TARGET_COUNT`]); anything else yields 1.
pub fn target_count_from_params(params: Option<&serde_json::Value>) -> i32 {
    params
        .and_then(|p| p.get("count"))
        .and_then(serde_json::Value::as_i64)
        .filter(|&n| n > 0)
        .map(|n| n.min(i64::from(MAX_TARGET_COUNT)) as i32)
        .unwrap_or(1)
}

/// The assignment day for a timestamp. Days roll over at UTC midnight.
pub fn assignment_date(now: Timestamp) -> NaiveDate {
    now.date_naive()
}

/// Validate the increment reported by a progress call.
pub fn validate_increment(increment: i32) -> Result<(), CoreError> {
    if !(1..=MAX_PROGRESS_INCREMENT).contains(&increment) {
        return Err(CoreError::Validation(format!(
            "increment must be between 1 and {MAX_PROGRESS_INCREMENT}, got {increment}"
        )));
    }
    Ok(())
}

/// Apply `increment` to a progress row.
///
/// Completed rows are left untouched. Otherwise progress grows by the
/// increment and is clamped at `target_count`; reaching the target marks the
/// row completed and sets `newly_completed`.
pub fn apply_progress(
    progress: i32,
    target_count: i32,
    is_completed: bool,
    increment: i32,
) -> ProgressOutcome {
    let target = target_count.max(1);
    if is_completed {
        return ProgressOutcome {
            progress: progress.min(target),
            is_completed: true,
            newly_completed: false,
        };
    }
    let next = progress
        .max(0)
        .saturating_add(increment.max(0))
        .min(target);
    let done = next >= target;
    ProgressOutcome {
        progress: next,
        is_completed: done,
        newly_completed: done,
    }
}

/// Validate the editable fields of a catalog mission.
pub fn validate_mission(draft: &MissionDraft<'_>) -> Result<(), CoreError> {
    if draft.name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Mission name must not be empty".to_string(),
        ));
    }
    if !VALID_MISSION_TYPES.contains(&draft.mission_type) {
        return Err(CoreError::Validation(format!(
            "Invalid mission_type '{}'. Must be one of: {}",
            draft.mission_type,
            VALID_MISSION_TYPES.join(", ")
        )));
    }
    if !VALID_ACTIONS.contains(&draft.target_action) {
        return Err(CoreError::Validation(format!(
            "Invalid target_action '{}'. Must be one of: {}",
            draft.target_action,
            VALID_ACTIONS.join(", ")
        )));
    }
    if !(0..=MAX_REWARD_EXP).contains(&draft.reward_exp) {
        return Err(CoreError::Validation(format!(
            "reward_exp must be between 0 and {MAX_REWARD_EXP}, got {}",
            draft.reward_exp
        )));
    }
    if let Some(params) = draft.target_params {
        if !params.is_object() {
            return Err(CoreError::Validation(
                "target_params must be a JSON object".to_string(),
            ));
        }
        if let Some(count) = params.get("count") {
            match count.as_i64() {
                Some(n) if (1..=i64::from(MAX_TARGET_COUNT)).contains(&n) => {}
                _ => {
                    return Err(CoreError::Validation(format!(
                        "target_params.count must be an integer between 1 and {MAX_TARGET_COUNT}"
                    )))
                }
            }
        }
    }
    Ok(())
}
