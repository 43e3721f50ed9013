//! Repository for the `chat_messages` table.

use sqlx::{PgConnection, PgPool};
use weatherpet_core::types::DbId;

use crate::models::chat::{ChatDailyCount, ChatMessage, ChatStats};

/// Column list for `chat_messages` queries.
const COLUMNS: &str = "id, user_id, message, reply, created_at, updated_at";

pub struct ChatRepo;

impl ChatRepo {
    /// Record a chat exchange inside the interaction transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        user_id: DbId,
        message: &str,
        reply: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_messages (user_id, message, reply) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(user_id)
            .bind(message)
            .bind(reply)
            .fetch_one(&mut *conn)
            .await
    }

    /// Most recent messages for one user, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chat_messages \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Per-day message counts over the trailing `days` UTC days (today included).
    pub async fn stats(pool: &PgPool, days: i32) -> Result<ChatStats, sqlx::Error> {
        let daily = sqlx::query_as::<_, ChatDailyCount>(
            "SELECT (created_at AT TIME ZONE 'UTC')::date AS day, \
                    COUNT(*) AS message_count, \
                    COUNT(DISTINCT user_id) AS distinct_users \
             FROM chat_messages \
             WHERE created_at >= ((NOW() AT TIME ZONE 'UTC')::date - ($1 - 1))::timestamp AT TIME ZONE 'UTC' \
             GROUP BY day \
             ORDER BY day",
        )
        .bind(days)
        .fetch_all(pool)
        .await?;

        let (total_messages, distinct_users): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(DISTINCT user_id) \
             FROM chat_messages \
             WHERE created_at >= ((NOW() AT TIME ZONE 'UTC')::date - ($1 - 1))::timestamp AT TIME ZONE 'UTC'",
        )
        .bind(days)
        .fetch_one(pool)
        .await?;

        Ok(ChatStats {
            days,
            total_messages,
            distinct_users,
            daily,
        })
    }
}
