//! Mission catalog models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use weatherpet_core::missions::{target_count_from_params, MissionDraft};
use weatherpet_core::types::{DbId, Timestamp};

/// A row from the `missions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mission {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub mission_type: String,
    pub target_action: String,
    pub target_params: Option<serde_json::Value>,
    pub reward_exp: i32,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Mission {
    /// Target count stamped onto new progress rows.
    pub fn target_count(&self) -> i32 {
        target_count_from_params(self.target_params.as_ref())
    }
}

/// DTO for creating a mission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMission {
    pub name: String,
    pub description: Option<String>,
    pub mission_type: Option<String>,
    pub target_action: String,
    pub target_params: Option<serde_json::Value>,
    pub reward_exp: Option<i32>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateMission {
    pub fn draft(&self) -> MissionDraft<'_> {
        MissionDraft {
            name: &self.name,
            mission_type: self.mission_type.as_deref().unwrap_or("daily"),
            target_action: &self.target_action,
            reward_exp: self.reward_exp.unwrap_or(10),
            target_params: self.target_params.as_ref(),
        }
    }
}

/// DTO for partially updating a mission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMission {
    pub name: Option<String>,
    pub description: Option<String>,
    pub mission_type: Option<String>,
    pub target_action: Option<String>,
    pub target_params: Option<serde_json::Value>,
    pub reward_exp: Option<i32>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateMission {
    /// The mission as it would look after this update.
    pub fn draft<'a>(&'a self, current: &'a Mission) -> MissionDraft<'a> {
        MissionDraft {
            name: self.name.as_deref().unwrap_or(&current.name),
            mission_type: self
                .mission_type
                .as_deref()
                .unwrap_or(&current.mission_type),
            target_action: self
                .target_action
                .as_deref()
                .unwrap_or(&current.target_action),
            reward_exp: self.reward_exp.unwrap_or(current.reward_exp),
            target_params: self
                .target_params
                .as_ref()
                .or(current.target_params.as_ref()),
        }
    }
}
