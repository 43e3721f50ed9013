//! Repository for the `user_mission_progress` table.
//!
//! Rows are unique per (user, mission, assigned_date). Assignment is an
//! idempotent `INSERT ... ON CONFLICT DO NOTHING`; progress writes go through
//! a locked row and a conditional update so completion happens once.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use weatherpet_core::missions::ProgressOutcome;
use weatherpet_core::types::DbId;

use crate::models::mission::Mission;
use crate::models::mission_progress::{TodayMission, UserMissionProgress};

/// Column list for `user_mission_progress` queries.
const COLUMNS: &str = "\
    id, user_id, mission_id, assigned_date, progress, target_count, \
    is_completed, completed_at, created_at, updated_at";

/// Idempotent single-row assignment.
const ASSIGN_SQL: &str = "\
    INSERT INTO user_mission_progress (user_id, mission_id, assigned_date, target_count) \
    VALUES ($1, $2, $3, $4) \
    ON CONFLICT (user_id, mission_id, assigned_date) DO NOTHING";

pub struct MissionProgressRepo;

impl MissionProgressRepo {
    /// Create missing progress rows (progress 0) for the given missions.
    ///
    /// Target counts come from each mission's `target_params`.
    pub async fn assign_missions(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
        missions: &[Mission],
    ) -> Result<u64, sqlx::Error> {
        if missions.is_empty() {
            return Ok(0);
        }
        let ids: Vec<DbId> = missions.iter().map(|m| m.id).collect();
        let targets: Vec<i32> = missions.iter().map(Mission::target_count).collect();

        let result = sqlx::query(
            "INSERT INTO user_mission_progress (user_id, mission_id, assigned_date, target_count) \
             SELECT $1, t.mission_id, $2, t.target_count \
             FROM UNNEST($3::BIGINT[], $4::INTEGER[]) AS t(mission_id, target_count) \
             ON CONFLICT (user_id, mission_id, assigned_date) DO NOTHING",
        )
        .bind(user_id)
        .bind(date)
        .bind(&ids)
        .bind(&targets)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Active missions joined with the user's rows for `date`.
    ///
    /// Only missions that already have a row are returned; call
    /// [`Self::assign_missions`] first.
    pub async fn list_for_day(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<TodayMission>, sqlx::Error> {
        sqlx::query_as::<_, TodayMission>(
            "SELECT m.id AS mission_id, m.name, m.description, m.mission_type, \
                    m.target_action, m.target_params, m.reward_exp, m.icon, \
                    p.id AS progress_id, p.assigned_date, p.progress, p.target_count, \
                    p.is_completed, p.completed_at \
             FROM missions m \
             JOIN user_mission_progress p \
               ON p.mission_id = m.id AND p.user_id = $1 AND p.assigned_date = $2 \
             WHERE m.is_active \
             ORDER BY m.id",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Ensure the row exists and lock it for the rest of the transaction.
    pub async fn lock_or_assign(
        conn: &mut PgConnection,
        user_id: DbId,
        mission: &Mission,
        date: NaiveDate,
    ) -> Result<UserMissionProgress, sqlx::Error> {
        sqlx::query(ASSIGN_SQL)
            .bind(user_id)
            .bind(mission.id)
            .bind(date)
            .bind(mission.target_count())
            .execute(&mut *conn)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM user_mission_progress \
             WHERE user_id = $1 AND mission_id = $2 AND assigned_date = $3 \
             FOR UPDATE"
        );
        sqlx::query_as::<_, UserMissionProgress>(&query)
            .bind(user_id)
            .bind(mission.id)
            .bind(date)
            .fetch_one(&mut *conn)
            .await
    }

    /// Write a progress outcome onto a row that is not yet completed.
    ///
    /// Returns `None` when the row was already completed, in which case the
    /// caller must not credit the reward.
    pub async fn save_outcome(
        conn: &mut PgConnection,
        progress_id: DbId,
        outcome: &ProgressOutcome,
    ) -> Result<Option<UserMissionProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE user_mission_progress SET \
                 progress = $2, \
                 is_completed = $3, \
                 completed_at = CASE WHEN $3 THEN NOW() ELSE NULL END \
             WHERE id = $1 AND NOT is_completed \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserMissionProgress>(&query)
            .bind(progress_id)
            .bind(outcome.progress)
            .bind(outcome.is_completed)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn find_for_day(
        pool: &PgPool,
        user_id: DbId,
        mission_id: DbId,
        date: NaiveDate,
    ) -> Result<Option<UserMissionProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_mission_progress \
             WHERE user_id = $1 AND mission_id = $2 AND assigned_date = $3"
        );
        sqlx::query_as::<_, UserMissionProgress>(&query)
            .bind(user_id)
            .bind(mission_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }
}
