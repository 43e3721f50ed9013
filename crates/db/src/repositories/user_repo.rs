//! Repository for the `users` table.

use sqlx::PgPool;
use weatherpet_core::types::DbId;

use crate::models::user::{CreateUser, User, UserWithMascot};

/// Column list for `users` queries.
const COLUMNS: &str = "\
    id, username, email, password_hash, role, is_active, \
    last_login_at, created_at, updated_at";

/// Provides account lookups and admin listing.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_login_at` after a successful login.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Activate or deactivate an account. Returns `false` if no row matched.
    pub async fn set_active(pool: &PgPool, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List users with their mascot summary, newest first.
    pub async fn list_with_mascots(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserWithMascot>, sqlx::Error> {
        sqlx::query_as::<_, UserWithMascot>(
            "SELECT u.id, u.username, u.email, u.role, u.is_active, u.last_login_at, \
                    u.created_at, m.name AS mascot_name, m.level AS mascot_level, \
                    m.experience AS mascot_experience, m.personality AS mascot_personality \
             FROM users u \
             LEFT JOIN mascots m ON m.user_id = u.id \
             ORDER BY u.created_at DESC, u.id DESC \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
