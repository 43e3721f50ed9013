//! Mascot stat model: bounded stats and the fixed per-interaction deltas.
//!
//! Every stat lives in `[STAT_MIN, STAT_MAX]`. Deltas are applied with
//! clamping, never wraparound, so any sequence of interactions leaves the
//! mascot inside the valid range.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lower bound for every bounded stat.
pub const STAT_MIN: i32 = 0;

/// Upper bound for every bounded stat.
pub const STAT_MAX: i32 = 100;

/// Default name given to a freshly created mascot.
pub const DEFAULT_MASCOT_NAME: &str = "Sunny";

/// Maximum length of a mascot name.
pub const MAX_NAME_LENGTH: usize = 50;

pub const INTERACTION_FEED: &str = "feed";
pub const INTERACTION_PLAY: &str = "play";
pub const INTERACTION_PET: &str = "pet";
pub const INTERACTION_CHAT: &str = "chat";

/// All valid interaction names.
pub const VALID_INTERACTIONS: &[&str] = &[
    INTERACTION_FEED,
    INTERACTION_PLAY,
    INTERACTION_PET,
    INTERACTION_CHAT,
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A user-initiated interaction with the mascot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Feed,
    Play,
    Pet,
    Chat,
}

impl Interaction {
    /// Parse from the wire/database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            INTERACTION_FEED => Ok(Self::Feed),
            INTERACTION_PLAY => Ok(Self::Play),
            INTERACTION_PET => Ok(Self::Pet),
            INTERACTION_CHAT => Ok(Self::Chat),
            _ => Err(CoreError::Validation(format!(
                "Invalid interaction '{s}'. Must be one of: {}",
                VALID_INTERACTIONS.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => INTERACTION_FEED,
            Self::Play => INTERACTION_PLAY,
            Self::Pet => INTERACTION_PET,
            Self::Chat => INTERACTION_CHAT,
        }
    }

    /// The fixed stat change this interaction applies.
    pub fn delta(&self) -> StatDelta {
        match self {
            Self::Feed => StatDelta {
                health: 5,
                happiness: 2,
                energy: 10,
                personality: 0,
                experience: 2,
            },
            Self::Play => StatDelta {
                health: 0,
                happiness: 10,
                energy: -10,
                personality: 5,
                experience: 5,
            },
            Self::Pet => StatDelta {
                health: 0,
                happiness: 5,
                energy: 0,
                personality: -3,
                experience: 1,
            },
            Self::Chat => StatDelta {
                health: 0,
                happiness: 2,
                energy: 0,
                personality: 0,
                experience: 1,
            },
        }
    }
}

/// Signed change to each stat. Experience is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatDelta {
    pub health: i32,
    pub happiness: i32,
    pub energy: i32,
    pub personality: i32,
    pub experience: i64,
}

/// The bounded stats of one mascot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MascotStats {
    pub health: i32,
    pub happiness: i32,
    pub energy: i32,
    /// Activity affinity: play pushes it up, petting pulls it down.
    pub personality: i32,
}

impl Default for MascotStats {
    fn default() -> Self {
        Self {
            health: 100,
            happiness: 70,
            energy: 80,
            personality: 50,
        }
    }
}

impl MascotStats {
    /// Apply a delta, clamping every field into range.
    pub fn apply(self, delta: &StatDelta) -> Self {
        Self {
            health: clamp_stat(self.health.saturating_add(delta.health)),
            happiness: clamp_stat(self.happiness.saturating_add(delta.happiness)),
            energy: clamp_stat(self.energy.saturating_add(delta.energy)),
            personality: clamp_stat(self.personality.saturating_add(delta.personality)),
        }
    }

    /// Coarse mood label for clients; derived, never stored.
    pub fn mood(&self) -> Mood {
        if self.health < 30 || self.energy < 20 {
            Mood::Tired
        } else if self.happiness >= 80 {
            Mood::Joyful
        } else if self.happiness >= 50 {
            Mood::Content
        } else {
            Mood::Sad
        }
    }
}

/// Derived mood shown by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Joyful,
    Content,
    Sad,
    Tired,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Clamp a raw value into `[STAT_MIN, STAT_MAX]`.
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Validate a user-chosen mascot name.
pub fn validate_mascot_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Mascot name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Mascot name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL: [Interaction; 4] = [
        Interaction::Feed,
        Interaction::Play,
        Interaction::Pet,
        Interaction::Chat,
    ];

    fn in_range(stats: &MascotStats) -> bool {
        [stats.health, stats.happiness, stats.energy, stats.personality]
            .iter()
            .all(|v| (STAT_MIN..=STAT_MAX).contains(v))
    }

    #[test]
    fn clamp_stat_bounds() {
        assert_eq!(clamp_stat(-5), 0);
        assert_eq!(clamp_stat(0), 0);
        assert_eq!(clamp_stat(55), 55);
        assert_eq!(clamp_stat(100), 100);
        assert_eq!(clamp_stat(140), 100);
    }

    #[test]
    fn feed_increments_and_clamps() {
        let stats = MascotStats {
            health: 98,
            happiness: 50,
            energy: 95,
            personality: 50,
        };
        let fed = stats.apply(&Interaction::Feed.delta());
        assert_eq!(fed.health, 100);
        assert_eq!(fed.energy, 100);
        assert_eq!(fed.happiness, 52);
        assert_eq!(fed.personality, 50);
    }

    #[test]
    fn play_drains_energy_without_wrapping() {
        let stats = MascotStats {
            health: 50,
            happiness: 50,
            energy: 4,
            personality: 98,
        };
        let played = stats.apply(&Interaction::Play.delta());
        assert_eq!(played.energy, 0);
        assert_eq!(played.personality, 100);
        assert_eq!(played.happiness, 60);
    }

    #[test]
    fn pet_lowers_personality_to_floor() {
        let stats = MascotStats {
            health: 50,
            happiness: 50,
            energy: 50,
            personality: 1,
        };
        assert_eq!(stats.apply(&Interaction::Pet.delta()).personality, 0);
    }

    #[test]
    fn long_interaction_sequences_stay_in_range() {
        // Walk every 6-step sequence over the four interactions from a few
        // extreme starting points.
        let starts = [
            MascotStats::default(),
            MascotStats {
                health: 0,
                happiness: 0,
                energy: 0,
                personality: 0,
            },
            MascotStats {
                health: 100,
                happiness: 100,
                energy: 100,
                personality: 100,
            },
        ];
        for start in starts {
            for code in 0..4usize.pow(6) {
                let mut stats = start;
                let mut c = code;
                for _ in 0..6 {
                    stats = stats.apply(&ALL[c % 4].delta());
                    c /= 4;
                    assert!(in_range(&stats), "out of range: {stats:?}");
                }
            }
        }
    }

    #[test]
    fn experience_deltas_are_non_negative() {
        for interaction in ALL {
            assert!(interaction.delta().experience >= 0);
        }
    }

    #[test]
    fn interaction_from_str_round_trip() {
        for interaction in ALL {
            assert_eq!(
                Interaction::from_str_value(interaction.as_str()).unwrap(),
                interaction
            );
        }
    }

    #[test]
    fn interaction_from_str_invalid() {
        assert_matches!(
            Interaction::from_str_value("tickle"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn mood_thresholds() {
        let mut stats = MascotStats::default();
        assert_eq!(stats.mood(), Mood::Content);
        stats.happiness = 85;
        assert_eq!(stats.mood(), Mood::Joyful);
        stats.energy = 10;
        assert_eq!(stats.mood(), Mood::Tired);
        stats.energy = 50;
        stats.happiness = 20;
        assert_eq!(stats.mood(), Mood::Sad);
    }

    #[test]
    fn mascot_name_validation() {
        assert!(validate_mascot_name("Nimbus").is_ok());
        assert!(validate_mascot_name("   ").is_err());
        assert!(validate_mascot_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }
}
