//! Per-user, per-day mission progress models.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use weatherpet_core::types::{DbId, Timestamp};

/// A row from the `user_mission_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserMissionProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub mission_id: DbId,
    pub assigned_date: NaiveDate,
    pub progress: i32,
    pub target_count: i32,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An active catalog mission joined with the caller's progress for one day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TodayMission {
    pub mission_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub mission_type: String,
    pub target_action: String,
    pub target_params: Option<serde_json::Value>,
    pub reward_exp: i32,
    pub icon: Option<String>,
    pub progress_id: DbId,
    pub assigned_date: NaiveDate,
    pub progress: i32,
    pub target_count: i32,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
}

/// A mission completed inside an interaction or progress call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedMission {
    pub mission_id: DbId,
    pub name: String,
    pub reward_exp: i32,
}
