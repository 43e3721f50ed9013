//! Admin dashboard handlers (`/admin`).
//!
//! All routes require the `admin` role: mascot settings, the mission
//! catalog, user accounts, and chat analytics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use weatherpet_core::error::CoreError;
use weatherpet_core::evolution::{resolve_form, validate_ladder};
use weatherpet_core::missions::validate_mission;
use weatherpet_core::types::DbId;
use weatherpet_db::models::mascot_settings::UpdateMascotSettings;
use weatherpet_db::models::mission::{CreateMission, UpdateMission};
use weatherpet_db::models::user::UserWithMascot;
use weatherpet_db::repositories::{ChatRepo, MascotSettingsRepo, MissionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{IncludeInactiveParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default window for chat analytics, in days.
const DEFAULT_STATS_DAYS: i32 = 7;

/// Longest window for chat analytics, in days.
const MAX_STATS_DAYS: i32 = 90;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/chat/stats`.
#[derive(Debug, Deserialize)]
pub struct ChatStatsParams {
    pub days: Option<i32>,
}

/// Request body for `PUT /admin/users/{id}/active`.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// A user row with the mascot's resolved evolution stage.
#[derive(Debug, Serialize)]
pub struct AdminUserView {
    #[serde(flatten)]
    pub user: UserWithMascot,
    pub mascot_form: Option<&'static str>,
    pub mascot_stage: Option<i32>,
}

fn mission_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Mission",
        id,
    })
}

// ---------------------------------------------------------------------------
// Mascot settings
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/mascot-settings
pub async fn get_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = MascotSettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/mascot-settings
///
/// Partial update. The merged result must form a valid ladder and level
/// curve; nothing is written otherwise.
pub async fn update_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateMascotSettings>,
) -> AppResult<impl IntoResponse> {
    let current = MascotSettingsRepo::get(&state.pool).await?;
    let (ladder, curve) = current.merged(&input);
    curve.validate()?;
    validate_ladder(&ladder, curve.max_level)?;
    validate_display_fields(&input)?;

    let settings = MascotSettingsRepo::update(&state.pool, &input).await?;

    tracing::info!(
        user_id = admin.user_id,
        level_1_to_2 = settings.evolution_level_1_to_2,
        level_2_to_3 = settings.evolution_level_2_to_3,
        level_3_to_4 = settings.evolution_level_3_to_4,
        exp_per_level = settings.exp_per_level,
        max_level = settings.max_level,
        "Mascot settings updated"
    );

    Ok(Json(DataResponse { data: settings }))
}

/// Form names and images, when provided, must not be blank.
fn validate_display_fields(input: &UpdateMascotSettings) -> Result<(), CoreError> {
    let fields = [
        ("base_form_name", &input.base_form_name),
        ("base_form_image", &input.base_form_image),
        ("second_form_name", &input.second_form_name),
        ("second_form_image", &input.second_form_image),
        ("third_active_form_name", &input.third_active_form_name),
        ("third_active_form_image", &input.third_active_form_image),
        ("third_calm_form_name", &input.third_calm_form_name),
        ("third_calm_form_image", &input.third_calm_form_image),
        ("fourth_ultimate_form_name", &input.fourth_ultimate_form_name),
        ("fourth_ultimate_form_image", &input.fourth_ultimate_form_image),
        ("fourth_legendary_form_name", &input.fourth_legendary_form_name),
        ("fourth_legendary_form_image", &input.fourth_legendary_form_image),
    ];
    for (name, value) in fields {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(CoreError::Validation(format!("{name} must not be blank")));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Mission catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/missions
pub async fn list_missions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let missions = MissionRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: missions }))
}

/// GET /api/v1/admin/missions/{id}
pub async fn get_mission(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mission = MissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| mission_not_found(id))?;
    Ok(Json(DataResponse { data: mission }))
}

/// POST /api/v1/admin/missions
pub async fn create_mission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMission>,
) -> AppResult<impl IntoResponse> {
    validate_mission(&input.draft())?;
    let mission = MissionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = admin.user_id,
        mission_id = mission.id,
        target_action = %mission.target_action,
        "Mission created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: mission })))
}

/// PUT /api/v1/admin/missions/{id}
///
/// Changing `target_params.count` affects rows assigned from now on; rows
/// already assigned keep the target they were created with.
pub async fn update_mission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMission>,
) -> AppResult<impl IntoResponse> {
    let current = MissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| mission_not_found(id))?;
    validate_mission(&input.draft(&current))?;

    let mission = MissionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| mission_not_found(id))?;

    tracing::info!(user_id = admin.user_id, mission_id = id, "Mission updated");

    Ok(Json(DataResponse { data: mission }))
}

/// DELETE /api/v1/admin/missions/{id}
///
/// Deactivates the mission; progress history is kept.
pub async fn delete_mission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MissionRepo::deactivate(&state.pool, id).await? {
        return Err(mission_not_found(id));
    }
    tracing::info!(user_id = admin.user_id, mission_id = id, "Mission deactivated");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let settings = MascotSettingsRepo::get(&state.pool).await?;
    let ladder = settings.ladder();
    let users = UserRepo::list_with_mascots(&state.pool, params.limit(), params.offset()).await?;

    let data: Vec<AdminUserView> = users
        .into_iter()
        .map(|user| {
            let form = user
                .mascot_level
                .zip(user.mascot_personality)
                .map(|(level, personality)| resolve_form(level, personality, &ladder));
            AdminUserView {
                mascot_form: form.map(|f| f.key()),
                mascot_stage: form.map(|f| f.stage()),
                user,
            }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/admin/users/{id}/active
///
/// Activate or deactivate an account. Admins cannot deactivate themselves.
pub async fn set_user_active(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetActiveRequest>,
) -> AppResult<StatusCode> {
    if id == admin.user_id && !input.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot deactivate your own account".into(),
        )));
    }
    if !UserRepo::set_active(&state.pool, id, input.is_active).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(
        user_id = admin.user_id,
        target_user_id = id,
        is_active = input.is_active,
        "User active flag changed"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Chat analytics
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/chat/stats?days=N
pub async fn chat_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ChatStatsParams>,
) -> AppResult<impl IntoResponse> {
    let days = params.days.unwrap_or(DEFAULT_STATS_DAYS);
    if !(1..=MAX_STATS_DAYS).contains(&days) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "days must be between 1 and {MAX_STATS_DAYS}, got {days}"
        ))));
    }
    let stats = ChatRepo::stats(&state.pool, days).await?;
    Ok(Json(DataResponse { data: stats }))
}
