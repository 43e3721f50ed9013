//! Repository for the `missions` catalog table.

use sqlx::{PgConnection, PgPool};
use weatherpet_core::types::DbId;

use crate::models::mission::{CreateMission, Mission, UpdateMission};

/// Column list for `missions` queries.
const COLUMNS: &str = "\
    id, name, description, mission_type, target_action, target_params, \
    reward_exp, icon, is_active, created_at, updated_at";

/// Provides CRUD operations for the admin-managed mission catalog.
pub struct MissionRepo;

impl MissionRepo {
    /// List catalog missions ordered by id, optionally including inactive ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Mission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM missions \
             WHERE ($1 OR is_active) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Mission>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions WHERE id = $1");
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active mission inside a transaction.
    pub async fn find_active_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions WHERE id = $1 AND is_active");
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Active missions whose `target_action` matches, ordered by id.
    pub async fn list_active_by_action(
        conn: &mut PgConnection,
        action: &str,
    ) -> Result<Vec<Mission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM missions \
             WHERE is_active AND target_action = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Mission>(&query)
            .bind(action)
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateMission) -> Result<Mission, sqlx::Error> {
        let query = format!(
            "INSERT INTO missions \
                 (name, description, mission_type, target_action, target_params, \
                  reward_exp, icon, is_active) \
             VALUES ($1, $2, COALESCE($3, 'daily'), $4, $5, COALESCE($6, 10), $7, COALESCE($8, TRUE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mission>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.mission_type)
            .bind(&input.target_action)
            .bind(&input.target_params)
            .bind(input.reward_exp)
            .bind(&input.icon)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Partially update a mission. Returns `None` if it does not exist.
    ///
    /// Progress rows already assigned keep the target count they were
    /// created with; only future assignments see a changed target.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMission,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!(
            "UPDATE missions SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 mission_type = COALESCE($4, mission_type), \
                 target_action = COALESCE($5, target_action), \
                 target_params = COALESCE($6, target_params), \
                 reward_exp = COALESCE($7, reward_exp), \
                 icon = COALESCE($8, icon), \
                 is_active = COALESCE($9, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.mission_type)
            .bind(&input.target_action)
            .bind(&input.target_params)
            .bind(input.reward_exp)
            .bind(&input.icon)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete by clearing `is_active`. Returns `false` if no row matched.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE missions SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
