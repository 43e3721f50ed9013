//! Handlers for the caller's daily missions (`/missions`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use weatherpet_core::missions::assignment_date;
use weatherpet_core::types::DbId;
use weatherpet_db::models::mission_progress::TodayMission;
use weatherpet_db::repositories::{MissionProgressRepo, MissionRepo};

use crate::error::AppResult;
use crate::handlers::mascot::MascotStatus;
use crate::interaction::{self, ProgressSummary};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /missions/progress`.
///
/// For `touch` missions the client reports how many touches it counted as
/// the increment.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub mission_id: DbId,
    #[serde(default = "default_increment")]
    pub increment: i32,
}

fn default_increment() -> i32 {
    1
}

/// Today's missions for the caller.
#[derive(Debug, Serialize)]
pub struct TodayMissions {
    pub date: NaiveDate,
    pub completed_count: usize,
    pub missions: Vec<TodayMission>,
}

/// Response for `POST /missions/progress`.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: ProgressSummary,
    pub mascot: MascotStatus,
}

/// GET /api/v1/missions/today
///
/// Assigns every active mission to the caller for today (idempotent), then
/// returns the catalog joined with today's progress.
pub async fn today(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let date = assignment_date(Utc::now());
    let active = MissionRepo::list(&state.pool, false).await?;
    let assigned =
        MissionProgressRepo::assign_missions(&state.pool, user.user_id, date, &active).await?;
    if assigned > 0 {
        tracing::debug!(user_id = user.user_id, %date, assigned, "Assigned daily missions");
    }

    let missions = MissionProgressRepo::list_for_day(&state.pool, user.user_id, date).await?;
    let completed_count = missions.iter().filter(|m| m.is_completed).count();

    Ok(Json(DataResponse {
        data: TodayMissions {
            date,
            completed_count,
            missions,
        },
    }))
}

/// POST /api/v1/missions/progress
pub async fn progress(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<ProgressRequest>,
) -> AppResult<impl IntoResponse> {
    let update =
        interaction::advance_mission(&state.pool, user.user_id, input.mission_id, input.increment)
            .await?;

    tracing::info!(
        user_id = user.user_id,
        mission_id = input.mission_id,
        increment = input.increment,
        progress = update.progress.progress,
        newly_completed = update.newly_completed,
        "Mission progress recorded"
    );

    Ok(Json(DataResponse {
        data: ProgressResponse {
            progress: update.summary(),
            mascot: MascotStatus::build(&update.mascot, &update.settings),
        },
    }))
}
