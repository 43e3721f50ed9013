//! User account models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use weatherpet_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `password_hash` is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Admin listing row: a user joined with a summary of their mascot.
///
/// Mascot columns are `None` for users who never opened the app.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserWithMascot {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub mascot_name: Option<String>,
    pub mascot_level: Option<i32>,
    pub mascot_experience: Option<i64>,
    pub mascot_personality: Option<i32>,
}
