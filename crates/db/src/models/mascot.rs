//! Mascot entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use weatherpet_core::stats::MascotStats;
use weatherpet_core::types::{DbId, Timestamp};

/// A row from the `mascots` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mascot {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub level: i32,
    pub experience: i64,
    pub health: i32,
    pub happiness: i32,
    pub energy: i32,
    pub personality: i32,
    pub last_fed_at: Option<Timestamp>,
    pub last_played_at: Option<Timestamp>,
    pub last_petted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Mascot {
    /// The bounded stats as a core value.
    pub fn stats(&self) -> MascotStats {
        MascotStats {
            health: self.health,
            happiness: self.happiness,
            energy: self.energy,
            personality: self.personality,
        }
    }
}

/// DTO for renaming a mascot.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameMascot {
    pub name: String,
}
