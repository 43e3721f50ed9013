//! Repository for the `mascot_settings` singleton row.

use sqlx::PgPool;

use crate::models::mascot_settings::{MascotSettings, UpdateMascotSettings};

/// Column list for `mascot_settings` queries.
const COLUMNS: &str = "\
    id, evolution_level_1_to_2, evolution_level_2_to_3, evolution_level_3_to_4, \
    personality_threshold, ultimate_evolution_threshold, exp_per_level, max_level, \
    base_form_name, base_form_image, second_form_name, second_form_image, \
    third_active_form_name, third_active_form_image, third_calm_form_name, third_calm_form_image, \
    fourth_ultimate_form_name, fourth_ultimate_form_image, \
    fourth_legendary_form_name, fourth_legendary_form_image, \
    idle_animation, evolution_animation, created_at, updated_at";

/// Reads and updates the admin-managed settings row.
pub struct MascotSettingsRepo;

impl MascotSettingsRepo {
    /// Load the settings row.
    ///
    /// The row is seeded by migration; if it was removed by hand it is
    /// recreated with column defaults.
    pub async fn get(pool: &PgPool) -> Result<MascotSettings, sqlx::Error> {
        let select = format!("SELECT {COLUMNS} FROM mascot_settings WHERE id = 1");
        if let Some(settings) = sqlx::query_as::<_, MascotSettings>(&select)
            .fetch_optional(pool)
            .await?
        {
            return Ok(settings);
        }

        tracing::warn!("mascot_settings row missing, reseeding defaults");
        sqlx::query("INSERT INTO mascot_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;
        sqlx::query_as::<_, MascotSettings>(&select)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Validation happens in the caller.
    pub async fn update(
        pool: &PgPool,
        dto: &UpdateMascotSettings,
    ) -> Result<MascotSettings, sqlx::Error> {
        let query = format!(
            "UPDATE mascot_settings SET \
                 evolution_level_1_to_2 = COALESCE($1, evolution_level_1_to_2), \
                 evolution_level_2_to_3 = COALESCE($2, evolution_level_2_to_3), \
                 evolution_level_3_to_4 = COALESCE($3, evolution_level_3_to_4), \
                 personality_threshold = COALESCE($4, personality_threshold), \
                 ultimate_evolution_threshold = COALESCE($5, ultimate_evolution_threshold), \
                 exp_per_level = COALESCE($6, exp_per_level), \
                 max_level = COALESCE($7, max_level), \
                 base_form_name = COALESCE($8, base_form_name), \
                 base_form_image = COALESCE($9, base_form_image), \
                 second_form_name = COALESCE($10, second_form_name), \
                 second_form_image = COALESCE($11, second_form_image), \
                 third_active_form_name = COALESCE($12, third_active_form_name), \
                 third_active_form_image = COALESCE($13, third_active_form_image), \
                 third_calm_form_name = COALESCE($14, third_calm_form_name), \
                 third_calm_form_image = COALESCE($15, third_calm_form_image), \
                 fourth_ultimate_form_name = COALESCE($16, fourth_ultimate_form_name), \
                 fourth_ultimate_form_image = COALESCE($17, fourth_ultimate_form_image), \
                 fourth_legendary_form_name = COALESCE($18, fourth_legendary_form_name), \
                 fourth_legendary_form_image = COALESCE($19, fourth_legendary_form_image), \
                 idle_animation = COALESCE($20, idle_animation), \
                 evolution_animation = COALESCE($21, evolution_animation) \
             WHERE id = 1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MascotSettings>(&query)
            .bind(dto.evolution_level_1_to_2)
            .bind(dto.evolution_level_2_to_3)
            .bind(dto.evolution_level_3_to_4)
            .bind(dto.personality_threshold)
            .bind(dto.ultimate_evolution_threshold)
            .bind(dto.exp_per_level)
            .bind(dto.max_level)
            .bind(&dto.base_form_name)
            .bind(&dto.base_form_image)
            .bind(&dto.second_form_name)
            .bind(&dto.second_form_image)
            .bind(&dto.third_active_form_name)
            .bind(&dto.third_active_form_image)
            .bind(&dto.third_calm_form_name)
            .bind(&dto.third_calm_form_image)
            .bind(&dto.fourth_ultimate_form_name)
            .bind(&dto.fourth_ultimate_form_image)
            .bind(&dto.fourth_legendary_form_name)
            .bind(&dto.fourth_legendary_form_image)
            .bind(dto.idle_animation)
            .bind(dto.evolution_animation)
            .fetch_one(pool)
            .await
    }
}
