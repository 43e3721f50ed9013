//! Chat log models used by the chat interaction and admin analytics.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use weatherpet_core::types::{DbId, Timestamp};

/// A row from the `chat_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub user_id: DbId,
    pub message: String,
    pub reply: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Message volume for one UTC day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatDailyCount {
    pub day: NaiveDate,
    pub message_count: i64,
    pub distinct_users: i64,
}

/// Aggregate chat analytics for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ChatStats {
    pub days: i32,
    pub total_messages: i64,
    pub distinct_users: i64,
    pub daily: Vec<ChatDailyCount>,
}
