//! Handlers for the caller's mascot (`/mascot`).
//!
//! Every route acts on the authenticated user's own mascot, creating it with
//! defaults on first access. The evolution form is resolved from the current
//! settings row on every response and never stored.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use weatherpet_core::chat::validate_message;
use weatherpet_core::evolution::{next_evolution_level, resolve_form};
use weatherpet_core::stats::{validate_mascot_name, Interaction, MascotStats, Mood};
use weatherpet_core::types::{DbId, Timestamp};
use weatherpet_db::models::mascot::{Mascot, RenameMascot};
use weatherpet_db::models::mascot_settings::MascotSettings;
use weatherpet_db::models::mission_progress::CompletedMission;
use weatherpet_db::repositories::{ChatRepo, MascotRepo, MascotSettingsRepo};

use crate::error::AppResult;
use crate::interaction;
use crate::middleware::rbac::RequireAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /mascot/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// The resolved evolution form with its configured display assets.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub key: &'static str,
    pub stage: i32,
    pub name: String,
    pub image: String,
}

/// Mascot snapshot returned by every mascot endpoint.
#[derive(Debug, Serialize)]
pub struct MascotStatus {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub experience: i64,
    /// `None` once the level cap is reached.
    pub experience_to_next_level: Option<i64>,
    pub stats: MascotStats,
    pub mood: Mood,
    pub form: FormView,
    /// `None` at the final stage.
    pub next_evolution_level: Option<i32>,
    pub idle_animation: bool,
    pub evolution_animation: bool,
    pub last_fed_at: Option<Timestamp>,
    pub last_played_at: Option<Timestamp>,
    pub last_petted_at: Option<Timestamp>,
}

impl MascotStatus {
    pub fn build(mascot: &Mascot, settings: &MascotSettings) -> Self {
        let ladder = settings.ladder();
        let stats = mascot.stats();
        let form = resolve_form(mascot.level, stats.personality, &ladder);
        let (form_name, form_image) = settings.display_for(form);

        Self {
            id: mascot.id,
            name: mascot.name.clone(),
            level: mascot.level,
            experience: mascot.experience,
            experience_to_next_level: settings
                .level_curve()
                .experience_to_next_level(mascot.experience),
            stats,
            mood: stats.mood(),
            form: FormView {
                key: form.key(),
                stage: form.stage(),
                name: form_name.to_string(),
                image: form_image.to_string(),
            },
            next_evolution_level: next_evolution_level(mascot.level, &ladder),
            idle_animation: settings.idle_animation,
            evolution_animation: settings.evolution_animation,
            last_fed_at: mascot.last_fed_at,
            last_played_at: mascot.last_played_at,
            last_petted_at: mascot.last_petted_at,
        }
    }
}

/// Response for feed/play/pet/chat.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub mascot: MascotStatus,
    pub completed_missions: Vec<CompletedMission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/mascot/status
pub async fn status(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = MascotSettingsRepo::get(&state.pool).await?;
    let mascot = MascotRepo::ensure(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: MascotStatus::build(&mascot, &settings),
    }))
}

/// POST /api/v1/mascot/feed
pub async fn feed(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    interact(&state, user.user_id, Interaction::Feed, None).await
}

/// POST /api/v1/mascot/play
pub async fn play(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    interact(&state, user.user_id, Interaction::Play, None).await
}

/// POST /api/v1/mascot/pet
pub async fn pet(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    interact(&state, user.user_id, Interaction::Pet, None).await
}

/// POST /api/v1/mascot/chat
///
/// Stores the message with a mood-dependent reply and applies the chat
/// stat delta.
pub async fn chat(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<ChatRequest>,
) -> AppResult<impl IntoResponse> {
    let message = validate_message(&input.message)?;
    interact(&state, user.user_id, Interaction::Chat, Some(message)).await
}

/// GET /api/v1/mascot/chat
///
/// The caller's most recent chat messages, newest first.
pub async fn chat_history(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let messages = ChatRepo::list_recent(&state.pool, user.user_id, params.limit()).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// PUT /api/v1/mascot/name
pub async fn rename(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<RenameMascot>,
) -> AppResult<impl IntoResponse> {
    validate_mascot_name(&input.name)?;
    let mascot = MascotRepo::rename(&state.pool, user.user_id, input.name.trim()).await?;
    let settings = MascotSettingsRepo::get(&state.pool).await?;

    tracing::info!(user_id = user.user_id, name = %mascot.name, "Mascot renamed");

    Ok(Json(DataResponse {
        data: MascotStatus::build(&mascot, &settings),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn interact(
    state: &AppState,
    user_id: DbId,
    kind: Interaction,
    chat_message: Option<&str>,
) -> AppResult<Json<DataResponse<InteractionResponse>>> {
    let outcome = interaction::perform(&state.pool, user_id, kind, chat_message).await?;

    tracing::info!(
        user_id,
        interaction = kind.as_str(),
        level = outcome.mascot.level,
        completed = outcome.completed_missions.len(),
        "Mascot interaction applied"
    );

    Ok(Json(DataResponse {
        data: InteractionResponse {
            mascot: MascotStatus::build(&outcome.mascot, &outcome.settings),
            completed_missions: outcome.completed_missions,
            reply: outcome.reply,
        },
    }))
}
