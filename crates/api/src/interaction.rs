//! Mascot interaction and mission progress orchestration.
//!
//! Each operation runs in a single transaction that locks the caller's mascot
//! row first and then any progress rows it touches. Holding the locks in that
//! order serializes concurrent requests for the same user, so no stat
//! increment or mission reward is lost or doubled. A transaction that still
//! fails with a serialization failure or deadlock is retried once; a second
//! failure surfaces as 409 Conflict.

use chrono::{NaiveDate, Utc};
use rand::seq::IndexedRandom;
use serde::Serialize;
use sqlx::PgConnection;
use weatherpet_core::chat::replies_for;
use weatherpet_core::error::CoreError;
use weatherpet_core::leveling::LevelCurve;
use weatherpet_core::missions::{
    action_for_interaction, apply_progress, assignment_date, validate_increment,
};
use weatherpet_core::stats::{Interaction, Mood};
use weatherpet_core::types::DbId;
use weatherpet_db::models::mascot::Mascot;
use weatherpet_db::models::mascot_settings::MascotSettings;
use weatherpet_db::models::mission_progress::{CompletedMission, UserMissionProgress};
use weatherpet_db::repositories::{
    ChatRepo, MascotRepo, MascotSettingsRepo, MissionProgressRepo, MissionRepo,
};
use weatherpet_db::DbPool;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Outcome of a feed/play/pet/chat interaction.
#[derive(Debug)]
pub struct InteractionOutcome {
    /// Mascot state after the stat change and any mission rewards.
    pub mascot: Mascot,
    /// Settings the request was evaluated against.
    pub settings: MascotSettings,
    /// Missions this interaction completed.
    pub completed_missions: Vec<CompletedMission>,
    /// The mascot's answer, for chat only.
    pub reply: Option<String>,
}

/// Outcome of an explicit mission progress report.
#[derive(Debug)]
pub struct ProgressUpdate {
    pub progress: UserMissionProgress,
    pub mascot: Mascot,
    pub settings: MascotSettings,
    /// Whether this call completed the mission.
    pub newly_completed: bool,
    /// Experience credited by this call (0 unless it completed the mission).
    pub reward_exp: i32,
}

/// Summary returned to clients after a progress report.
#[derive(Debug, Serialize)]
pub struct ProgressSummary {
    pub mission_id: DbId,
    pub progress: i32,
    pub target_count: i32,
    pub is_completed: bool,
    pub newly_completed: bool,
    pub reward_exp: i32,
}

impl ProgressUpdate {
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            mission_id: self.progress.mission_id,
            progress: self.progress.progress,
            target_count: self.progress.target_count,
            is_completed: self.progress.is_completed,
            newly_completed: self.newly_completed,
            reward_exp: self.reward_exp,
        }
    }
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

/// Apply an interaction to the caller's mascot.
///
/// Creates the mascot with defaults if needed, applies the fixed stat delta,
/// advances every active mission whose `target_action` matches the
/// interaction by one, and credits rewards for missions completed on the way.
/// `chat_message` must be present (and already validated) for
/// [`Interaction::Chat`] and is ignored otherwise.
pub async fn perform(
    pool: &DbPool,
    user_id: DbId,
    interaction: Interaction,
    chat_message: Option<&str>,
) -> AppResult<InteractionOutcome> {
    let settings = MascotSettingsRepo::get(pool).await?;
    let curve = settings.level_curve();
    let today = assignment_date(Utc::now());
    let message = match interaction {
        Interaction::Chat => Some(chat_message.ok_or_else(|| {
            AppError::Core(CoreError::Validation("Chat message is required".into()))
        })?),
        _ => None,
    };

    let first = perform_once(pool, user_id, interaction, message, &curve, today).await;
    let (mascot, completed_missions, reply) = match first {
        Err(err) if weatherpet_db::is_write_conflict(&err) => {
            tracing::warn!(
                user_id,
                interaction = interaction.as_str(),
                error = %err,
                "Interaction conflicted, retrying once"
            );
            perform_once(pool, user_id, interaction, message, &curve, today).await?
        }
        other => other?,
    };

    Ok(InteractionOutcome {
        mascot,
        settings,
        completed_missions,
        reply,
    })
}

type InteractionRows = (Mascot, Vec<CompletedMission>, Option<String>);

async fn perform_once(
    pool: &DbPool,
    user_id: DbId,
    interaction: Interaction,
    chat_message: Option<&str>,
    curve: &LevelCurve,
    today: NaiveDate,
) -> Result<InteractionRows, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let current = MascotRepo::lock_or_create(&mut *tx, user_id).await?;
    let delta = interaction.delta();
    let stats = current.stats().apply(&delta);
    let credit = curve.credit(current.experience, current.level, delta.experience);
    let mut mascot =
        MascotRepo::save_interaction(&mut *tx, current.id, interaction, &stats, &credit).await?;

    let reply = match chat_message {
        Some(message) => {
            let reply = pick_reply(stats.mood());
            ChatRepo::insert(&mut *tx, user_id, message, reply).await?;
            Some(reply.to_string())
        }
        None => None,
    };

    let completed = advance_matching(
        &mut *tx,
        user_id,
        action_for_interaction(interaction),
        today,
    )
    .await?;

    let reward: i64 = completed.iter().map(|m| i64::from(m.reward_exp)).sum();
    if reward > 0 {
        mascot = MascotRepo::credit_experience(&mut *tx, &mascot, reward, curve).await?;
    }

    tx.commit().await?;
    Ok((mascot, completed, reply))
}

/// Advance each active mission for `action` by one step.
///
/// Returns only the missions that crossed their target in this call.
async fn advance_matching(
    conn: &mut PgConnection,
    user_id: DbId,
    action: &str,
    today: NaiveDate,
) -> Result<Vec<CompletedMission>, sqlx::Error> {
    let missions = MissionRepo::list_active_by_action(&mut *conn, action).await?;
    let mut completed = Vec::new();

    for mission in missions {
        let row = MissionProgressRepo::lock_or_assign(&mut *conn, user_id, &mission, today).await?;
        let outcome = apply_progress(row.progress, row.target_count, row.is_completed, 1);
        if !outcome.changed(row.progress) {
            continue;
        }
        let saved = MissionProgressRepo::save_outcome(&mut *conn, row.id, &outcome).await?;
        if outcome.newly_completed && saved.is_some() {
            tracing::info!(user_id, mission_id = mission.id, "Mission completed");
            completed.push(CompletedMission {
                mission_id: mission.id,
                name: mission.name,
                reward_exp: mission.reward_exp,
            });
        }
    }

    Ok(completed)
}

/// A canned reply matching the mascot's mood.
fn pick_reply(mood: Mood) -> &'static str {
    let replies = replies_for(mood);
    replies
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("...")
}

// ---------------------------------------------------------------------------
// Mission progress
// ---------------------------------------------------------------------------

/// Add `increment` to the caller's progress on one mission for today.
///
/// The progress row is created on demand. Progress is clamped at the target;
/// the call that reaches it marks the row completed and credits
/// `reward_exp` to the mascot. Later calls change nothing.
pub async fn advance_mission(
    pool: &DbPool,
    user_id: DbId,
    mission_id: DbId,
    increment: i32,
) -> AppResult<ProgressUpdate> {
    validate_increment(increment)?;

    let settings = MascotSettingsRepo::get(pool).await?;
    let curve = settings.level_curve();
    let today = assignment_date(Utc::now());

    let first = advance_once(pool, user_id, mission_id, increment, &curve, today).await;
    let result = match first {
        Err(err) if weatherpet_db::is_write_conflict(&err) => {
            tracing::warn!(
                user_id,
                mission_id,
                error = %err,
                "Mission progress conflicted, retrying once"
            );
            advance_once(pool, user_id, mission_id, increment, &curve, today).await?
        }
        other => other?,
    };

    let (progress, mascot, completion) = result.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Mission",
        id: mission_id,
    }))?;

    Ok(ProgressUpdate {
        progress,
        mascot,
        settings,
        newly_completed: completion.is_some(),
        reward_exp: completion.unwrap_or(0),
    })
}

/// Progress row, mascot, and the reward if this call completed the mission.
type ProgressRows = (UserMissionProgress, Mascot, Option<i32>);

/// `Ok(None)` when the mission does not exist or is inactive.
async fn advance_once(
    pool: &DbPool,
    user_id: DbId,
    mission_id: DbId,
    increment: i32,
    curve: &LevelCurve,
    today: NaiveDate,
) -> Result<Option<ProgressRows>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(mission) = MissionRepo::find_active_by_id(&mut *tx, mission_id).await? else {
        return Ok(None);
    };

    let mut mascot = MascotRepo::lock_or_create(&mut *tx, user_id).await?;
    let mut row = MissionProgressRepo::lock_or_assign(&mut *tx, user_id, &mission, today).await?;
    let outcome = apply_progress(row.progress, row.target_count, row.is_completed, increment);

    let mut completion = None;
    if outcome.changed(row.progress) {
        if let Some(saved) = MissionProgressRepo::save_outcome(&mut *tx, row.id, &outcome).await? {
            row = saved;
            if outcome.newly_completed {
                completion = Some(mission.reward_exp);
                tracing::info!(
                    user_id,
                    mission_id,
                    reward_exp = mission.reward_exp,
                    "Mission completed"
                );
            }
        }
    }

    if let Some(reward) = completion.filter(|&r| r > 0) {
        mascot = MascotRepo::credit_experience(&mut *tx, &mascot, i64::from(reward), curve).await?;
    }

    tx.commit().await?;
    Ok(Some((row, mascot, completion)))
}
