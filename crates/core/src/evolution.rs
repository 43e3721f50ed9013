//! Evolution resolver.
//!
//! The displayed form of a mascot is a pure function of its level, its
//! personality signal and the admin-configured [`EvolutionLadder`]. Nothing
//! here is cached or stored: callers resolve the form on every read so a
//! settings change takes effect immediately.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::stats::{STAT_MAX, STAT_MIN};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const FORM_BASE: &str = "base";
pub const FORM_SECOND: &str = "second";
pub const FORM_THIRD_ACTIVE: &str = "third_active";
pub const FORM_THIRD_CALM: &str = "third_calm";
pub const FORM_FOURTH_ULTIMATE: &str = "fourth_ultimate";
pub const FORM_FOURTH_LEGENDARY: &str = "fourth_legendary";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One rung (or sibling variant) of the evolution ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionForm {
    Base,
    Second,
    ThirdActive,
    ThirdCalm,
    FourthUltimate,
    FourthLegendary,
}

impl EvolutionForm {
    /// Stage number, 1 through 4.
    pub fn stage(&self) -> i32 {
        match self {
            Self::Base => 1,
            Self::Second => 2,
            Self::ThirdActive | Self::ThirdCalm => 3,
            Self::FourthUltimate | Self::FourthLegendary => 4,
        }
    }

    /// Stable key used for settings columns and the API.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Base => FORM_BASE,
            Self::Second => FORM_SECOND,
            Self::ThirdActive => FORM_THIRD_ACTIVE,
            Self::ThirdCalm => FORM_THIRD_CALM,
            Self::FourthUltimate => FORM_FOURTH_ULTIMATE,
            Self::FourthLegendary => FORM_FOURTH_LEGENDARY,
        }
    }
}

/// Level and personality thresholds that drive evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionLadder {
    pub level_1_to_2: i32,
    pub level_2_to_3: i32,
    pub level_3_to_4: i32,
    /// At stage 3, personality at or above this picks the active form.
    pub personality_threshold: i32,
    /// At stage 4, personality at or above this picks the legendary form.
    pub ultimate_threshold: i32,
}

impl Default for EvolutionLadder {
    fn default() -> Self {
        Self {
            level_1_to_2: 11,
            level_2_to_3: 21,
            level_3_to_4: 31,
            personality_threshold: 60,
            ultimate_threshold: 80,
        }
    }
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Pick the active form for the given level and personality signal.
pub fn resolve_form(level: i32, personality: i32, ladder: &EvolutionLadder) -> EvolutionForm {
    if level < ladder.level_1_to_2 {
        EvolutionForm::Base
    } else if level < ladder.level_2_to_3 {
        EvolutionForm::Second
    } else if level < ladder.level_3_to_4 {
        if personality >= ladder.personality_threshold {
            EvolutionForm::ThirdActive
        } else {
            EvolutionForm::ThirdCalm
        }
    } else if personality >= ladder.ultimate_threshold {
        EvolutionForm::FourthLegendary
    } else {
        EvolutionForm::FourthUltimate
    }
}

/// Level at which the next stage unlocks, or `None` at the final stage.
pub fn next_evolution_level(level: i32, ladder: &EvolutionLadder) -> Option<i32> {
    [ladder.level_1_to_2, ladder.level_2_to_3, ladder.level_3_to_4]
        .into_iter()
        .find(|&threshold| level < threshold)
}

/// Check that a ladder is usable with the given level cap.
///
/// Thresholds must be at least 2, strictly increasing, and reachable
/// (not above `max_level`). Personality thresholds must lie in the stat range.
pub fn validate_ladder(ladder: &EvolutionLadder, max_level: i32) -> Result<(), CoreError> {
    if ladder.level_1_to_2 < 2 {
        return Err(CoreError::Validation(format!(
            "evolution_level_1_to_2 must be at least 2, got {}",
            ladder.level_1_to_2
        )));
    }
    if ladder.level_2_to_3 <= ladder.level_1_to_2 || ladder.level_3_to_4 <= ladder.level_2_to_3 {
        return Err(CoreError::Validation(format!(
            "Evolution levels must be strictly increasing, got {} / {} / {}",
            ladder.level_1_to_2, ladder.level_2_to_3, ladder.level_3_to_4
        )));
    }
    if ladder.level_3_to_4 > max_level {
        return Err(CoreError::Validation(format!(
            "evolution_level_3_to_4 ({}) exceeds max_level ({max_level})",
            ladder.level_3_to_4
        )));
    }
    for (name, value) in [
        ("personality_threshold", ladder.personality_threshold),
        ("ultimate_evolution_threshold", ladder.ultimate_threshold),
    ] {
        if !(STAT_MIN..=STAT_MAX).contains(&value) {
            return Err(CoreError::Validation(format!(
                "{name} must be between {STAT_MIN} and {STAT_MAX}, got {value}"
            )));
        }
    }
    Ok(())
}
