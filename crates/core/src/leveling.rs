//! Level as a function of cumulative experience.

use serde::Serialize;

use crate::error::CoreError;

/// Experience-to-level curve taken from the mascot settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCurve {
    /// Experience needed per level. Always at least 1.
    pub exp_per_level: i32,
    /// Hard level cap.
    pub max_level: i32,
}

/// Result of crediting experience to a mascot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExperienceCredit {
    pub experience: i64,
    pub level: i32,
    pub leveled_up: bool,
}

impl LevelCurve {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.exp_per_level < 1 {
            return Err(CoreError::Validation(format!(
                "exp_per_level must be at least 1, got {}",
                self.exp_per_level
            )));
        }
        if self.max_level < 1 {
            return Err(CoreError::Validation(format!(
                "max_level must be at least 1, got {}",
                self.max_level
            )));
        }
        Ok(())
    }

    /// `min(max_level, 1 + experience / exp_per_level)`.
    ///
    /// Negative experience is treated as zero and a non-positive
    /// `exp_per_level` as one so a bad settings row can never panic.
    pub fn level_for_experience(&self, experience: i64) -> i32 {
        let per_level = i64::from(self.exp_per_level.max(1));
        let raw = 1 + experience.max(0) / per_level;
        let capped = raw.min(i64::from(self.max_level.max(1)));
        i32::try_from(capped).unwrap_or(i32::MAX)
    }

    /// Experience still needed to reach the next level, or `None` at the cap.
    pub fn experience_to_next_level(&self, experience: i64) -> Option<i64> {
        let level = self.level_for_experience(experience);
        if level >= self.max_level {
            return None;
        }
        let next_at = i64::from(level) * i64::from(self.exp_per_level.max(1));
        Some((next_at - experience.max(0)).max(0))
    }

    /// Add `reward` experience and recompute the level.
    ///
    /// Experience never decreases and the level never drops below
    /// `current_level`, even if the curve was tightened since the last write.
    pub fn credit(&self, experience: i64, current_level: i32, reward: i64) -> ExperienceCredit {
        let experience = experience.saturating_add(reward.max(0));
        let level = self.level_for_experience(experience).max(current_level);
        ExperienceCredit {
            experience,
            level,
            leveled_up: level > current_level,
        }
    }
}
