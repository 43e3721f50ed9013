//! Mascot settings singleton model and update DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use weatherpet_core::evolution::{EvolutionForm, EvolutionLadder};
use weatherpet_core::leveling::LevelCurve;
use weatherpet_core::types::Timestamp;

/// The single row (id = 1) of the `mascot_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MascotSettings {
    pub id: i16,
    pub evolution_level_1_to_2: i32,
    pub evolution_level_2_to_3: i32,
    pub evolution_level_3_to_4: i32,
    pub personality_threshold: i32,
    pub ultimate_evolution_threshold: i32,
    pub exp_per_level: i32,
    pub max_level: i32,
    pub base_form_name: String,
    pub base_form_image: String,
    pub second_form_name: String,
    pub second_form_image: String,
    pub third_active_form_name: String,
    pub third_active_form_image: String,
    pub third_calm_form_name: String,
    pub third_calm_form_image: String,
    pub fourth_ultimate_form_name: String,
    pub fourth_ultimate_form_image: String,
    pub fourth_legendary_form_name: String,
    pub fourth_legendary_form_image: String,
    pub idle_animation: bool,
    pub evolution_animation: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MascotSettings {
    pub fn ladder(&self) -> EvolutionLadder {
        EvolutionLadder {
            level_1_to_2: self.evolution_level_1_to_2,
            level_2_to_3: self.evolution_level_2_to_3,
            level_3_to_4: self.evolution_level_3_to_4,
            personality_threshold: self.personality_threshold,
            ultimate_threshold: self.ultimate_evolution_threshold,
        }
    }

    pub fn level_curve(&self) -> LevelCurve {
        LevelCurve {
            exp_per_level: self.exp_per_level,
            max_level: self.max_level,
        }
    }

    /// Display name and image configured for a form.
    pub fn display_for(&self, form: EvolutionForm) -> (&str, &str) {
        match form {
            EvolutionForm::Base => (&self.base_form_name, &self.base_form_image),
            EvolutionForm::Second => (&self.second_form_name, &self.second_form_image),
            EvolutionForm::ThirdActive => {
                (&self.third_active_form_name, &self.third_active_form_image)
            }
            EvolutionForm::ThirdCalm => (&self.third_calm_form_name, &self.third_calm_form_image),
            EvolutionForm::FourthUltimate => (
                &self.fourth_ultimate_form_name,
                &self.fourth_ultimate_form_image,
            ),
            EvolutionForm::FourthLegendary => (
                &self.fourth_legendary_form_name,
                &self.fourth_legendary_form_image,
            ),
        }
    }

    /// Overlay a partial update onto this row, for validation before writing.
    pub fn merged(&self, dto: &UpdateMascotSettings) -> (EvolutionLadder, LevelCurve) {
        let ladder = EvolutionLadder {
            level_1_to_2: dto.evolution_level_1_to_2.unwrap_or(self.evolution_level_1_to_2),
            level_2_to_3: dto.evolution_level_2_to_3.unwrap_or(self.evolution_level_2_to_3),
            level_3_to_4: dto.evolution_level_3_to_4.unwrap_or(self.evolution_level_3_to_4),
            personality_threshold: dto
                .personality_threshold
                .unwrap_or(self.personality_threshold),
            ultimate_threshold: dto
                .ultimate_evolution_threshold
                .unwrap_or(self.ultimate_evolution_threshold),
        };
        let curve = LevelCurve {
            exp_per_level: dto.exp_per_level.unwrap_or(self.exp_per_level),
            max_level: dto.max_level.unwrap_or(self.max_level),
        };
        (ladder, curve)
    }
}

/// DTO for partially updating the settings row. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMascotSettings {
    pub evolution_level_1_to_2: Option<i32>,
    pub evolution_level_2_to_3: Option<i32>,
    pub evolution_level_3_to_4: Option<i32>,
    pub personality_threshold: Option<i32>,
    pub ultimate_evolution_threshold: Option<i32>,
    pub exp_per_level: Option<i32>,
    pub max_level: Option<i32>,
    pub base_form_name: Option<String>,
    pub base_form_image: Option<String>,
    pub second_form_name: Option<String>,
    pub second_form_image: Option<String>,
    pub third_active_form_name: Option<String>,
    pub third_active_form_image: Option<String>,
    pub third_calm_form_name: Option<String>,
    pub third_calm_form_image: Option<String>,
    pub fourth_ultimate_form_name: Option<String>,
    pub fourth_ultimate_form_image: Option<String>,
    pub fourth_legendary_form_name: Option<String>,
    pub fourth_legendary_form_image: Option<String>,
    pub idle_animation: Option<bool>,
    pub evolution_animation: Option<bool>,
}
