//! Repository for the `mascots` table.
//!
//! Mascots are created lazily: every entry point goes through an
//! `INSERT ... ON CONFLICT DO NOTHING` so the first read for a user seeds
//! the default row. Mutations lock the row with `SELECT ... FOR UPDATE`
//! inside the caller's transaction so concurrent interactions serialize.

use sqlx::{PgConnection, PgPool};
use weatherpet_core::leveling::{ExperienceCredit, LevelCurve};
use weatherpet_core::stats::{Interaction, MascotStats};
use weatherpet_core::types::DbId;

use crate::models::mascot::Mascot;

/// Column list for `mascots` queries.
const COLUMNS: &str = "\
    id, user_id, name, level, experience, health, happiness, energy, personality, \
    last_fed_at, last_played_at, last_petted_at, created_at, updated_at";

/// Seeds a default mascot for a user if none exists. Safe to repeat.
const ENSURE_SQL: &str = "INSERT INTO mascots (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING";

pub struct MascotRepo;

impl MascotRepo {
    /// Return the user's mascot, creating the default one on first access.
    pub async fn ensure(pool: &PgPool, user_id: DbId) -> Result<Mascot, sqlx::Error> {
        sqlx::query(ENSURE_SQL).bind(user_id).execute(pool).await?;

        let query = format!("SELECT {COLUMNS} FROM mascots WHERE user_id = $1");
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Ensure the mascot exists and lock its row for the rest of the transaction.
    pub async fn lock_or_create(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Mascot, sqlx::Error> {
        sqlx::query(ENSURE_SQL)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM mascots WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Persist new stats and experience after an interaction.
    ///
    /// Also stamps the timestamp column that belongs to the interaction
    /// (`last_fed_at`, `last_played_at` or `last_petted_at`).
    pub async fn save_interaction(
        conn: &mut PgConnection,
        mascot_id: DbId,
        interaction: Interaction,
        stats: &MascotStats,
        credit: &ExperienceCredit,
    ) -> Result<Mascot, sqlx::Error> {
        let query = format!(
            "UPDATE mascots SET \
                 health = $2, happiness = $3, energy = $4, personality = $5, \
                 experience = $6, level = $7, \
                 last_fed_at = CASE WHEN $8 = 'feed' THEN NOW() ELSE last_fed_at END, \
                 last_played_at = CASE WHEN $8 = 'play' THEN NOW() ELSE last_played_at END, \
                 last_petted_at = CASE WHEN $8 = 'pet' THEN NOW() ELSE last_petted_at END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mascot>(&query)
            .bind(mascot_id)
            .bind(stats.health)
            .bind(stats.happiness)
            .bind(stats.energy)
            .bind(stats.personality)
            .bind(credit.experience)
            .bind(credit.level)
            .bind(interaction.as_str())
            .fetch_one(&mut *conn)
            .await
    }

    /// Add `reward` experience to a locked mascot and recompute its level.
    ///
    /// `mascot` must be the row returned by [`Self::lock_or_create`] (or a
    /// later write) in the same transaction.
    pub async fn credit_experience(
        conn: &mut PgConnection,
        mascot: &Mascot,
        reward: i64,
        curve: &LevelCurve,
    ) -> Result<Mascot, sqlx::Error> {
        let credit = curve.credit(mascot.experience, mascot.level, reward);
        let query = format!(
            "UPDATE mascots SET experience = $2, level = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Mascot>(&query)
            .bind(mascot.id)
            .bind(credit.experience)
            .bind(credit.level)
            .fetch_one(&mut *conn)
            .await?;

        if credit.leveled_up {
            tracing::info!(
                user_id = updated.user_id,
                level = updated.level,
                "Mascot leveled up"
            );
        }
        Ok(updated)
    }

    /// Rename the user's mascot, creating it first if needed.
    pub async fn rename(pool: &PgPool, user_id: DbId, name: &str) -> Result<Mascot, sqlx::Error> {
        sqlx::query(ENSURE_SQL).bind(user_id).execute(pool).await?;

        let query = format!(
            "UPDATE mascots SET name = $2 WHERE user_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mascot>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
