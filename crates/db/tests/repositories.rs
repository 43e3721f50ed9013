//! Mascot and mission-progress repositories against a real database.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;
use weatherpet_core::leveling::LevelCurve;
use weatherpet_core::missions::apply_progress;
use weatherpet_core::stats::{Interaction, STAT_MAX};
use weatherpet_db::models::user::CreateUser;
use weatherpet_db::repositories::{
    MascotRepo, MascotSettingsRepo, MissionProgressRepo, MissionRepo, UserRepo,
};

async fn new_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: "$argon2id$placeholder".to_string(),
            role: "user".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn curve() -> LevelCurve {
    LevelCurve {
        exp_per_level: 100,
        max_level: 50,
    }
}

// ---------------------------------------------------------------------------
// Mascots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_is_idempotent(pool: PgPool) {
    let user_id = new_user(&pool, "once").await;

    let first = MascotRepo::ensure(&pool, user_id).await.unwrap();
    let second = MascotRepo::ensure(&pool, user_id).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.name, "Sunny");
    assert_eq!(first.level, 1);
    assert_eq!(first.stats().personality, 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_interaction_stamps_timestamp(pool: PgPool) {
    let user_id = new_user(&pool, "stamp").await;
    let mut tx = pool.begin().await.unwrap();

    let mascot = MascotRepo::lock_or_create(&mut *tx, user_id).await.unwrap();
    let delta = Interaction::Pet.delta();
    let stats = mascot.stats().apply(&delta);
    let credit = curve().credit(mascot.experience, mascot.level, delta.experience);
    let saved = MascotRepo::save_interaction(&mut *tx, mascot.id, Interaction::Pet, &stats, &credit)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert!(saved.last_petted_at.is_some());
    assert!(saved.last_fed_at.is_none());
    assert_eq!(saved.happiness, 75);
    assert_eq!(saved.personality, 47);
    assert_eq!(saved.experience, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_feeding_clamps_at_max(pool: PgPool) {
    let user_id = new_user(&pool, "full").await;

    for _ in 0..20 {
        let mut tx = pool.begin().await.unwrap();
        let mascot = MascotRepo::lock_or_create(&mut *tx, user_id).await.unwrap();
        let delta = Interaction::Feed.delta();
        let stats = mascot.stats().apply(&delta);
        let credit = curve().credit(mascot.experience, mascot.level, delta.experience);
        MascotRepo::save_interaction(&mut *tx, mascot.id, Interaction::Feed, &stats, &credit)
            .await
            .unwrap();
        tx.commit().await.unwrap();
    }

    let mascot = MascotRepo::ensure(&pool, user_id).await.unwrap();
    assert_eq!(mascot.health, STAT_MAX);
    assert_eq!(mascot.energy, STAT_MAX);
    assert_eq!(mascot.experience, 40);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stat_check_constraint_rejects_out_of_range(pool: PgPool) {
    let user_id = new_user(&pool, "bounded").await;
    MascotRepo::ensure(&pool, user_id).await.unwrap();

    let result = sqlx::query("UPDATE mascots SET happiness = 101 WHERE user_id = $1")
        .bind(user_id)
        .execute(&pool)
        .await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn credit_experience_levels_up(pool: PgPool) {
    let user_id = new_user(&pool, "climber").await;
    let mut tx = pool.begin().await.unwrap();
    let mascot = MascotRepo::lock_or_create(&mut *tx, user_id).await.unwrap();

    let updated = MascotRepo::credit_experience(&mut *tx, &mascot, 250, &curve())
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(updated.experience, 250);
    assert_eq!(updated.level, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rename_persists(pool: PgPool) {
    let user_id = new_user(&pool, "named").await;
    let mascot = MascotRepo::rename(&pool, user_id, "Cirrus").await.unwrap();
    assert_eq!(mascot.name, "Cirrus");
    assert_eq!(MascotRepo::ensure(&pool, user_id).await.unwrap().name, "Cirrus");
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn settings_get_reseeds_missing_row(pool: PgPool) {
    sqlx::query("DELETE FROM mascot_settings")
        .execute(&pool)
        .await
        .unwrap();

    let settings = MascotSettingsRepo::get(&pool).await.unwrap();
    assert_eq!(settings.id, 1);
    assert_eq!(settings.evolution_level_1_to_2, 11);
}

// ---------------------------------------------------------------------------
// Mission progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn assign_missions_is_idempotent(pool: PgPool) {
    let user_id = new_user(&pool, "assignee").await;
    let missions = MissionRepo::list(&pool, false).await.unwrap();

    let first = MissionProgressRepo::assign_missions(&pool, user_id, day(), &missions)
        .await
        .unwrap();
    let second = MissionProgressRepo::assign_missions(&pool, user_id, day(), &missions)
        .await
        .unwrap();
    assert_eq!(first, missions.len() as u64);
    assert_eq!(second, 0);

    let rows = MissionProgressRepo::list_for_day(&pool, user_id, day())
        .await
        .unwrap();
    assert_eq!(rows.len(), missions.len());
    for row in &rows {
        let mission = missions.iter().find(|m| m.id == row.mission_id).unwrap();
        assert_eq!(row.target_count, mission.target_count());
        assert_eq!(row.progress, 0);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_row_is_only_saved_once(pool: PgPool) {
    let user_id = new_user(&pool, "finisher").await;
    let missions = MissionRepo::list(&pool, false).await.unwrap();
    let mission = missions.iter().find(|m| m.target_count() == 3).unwrap();

    let mut completions = 0;
    for _ in 0..4 {
        let mut tx = pool.begin().await.unwrap();
        let row = MissionProgressRepo::lock_or_assign(&mut *tx, user_id, mission, day())
            .await
            .unwrap();
        let outcome = apply_progress(row.progress, row.target_count, row.is_completed, 1);
        if outcome.changed(row.progress) {
            let saved = MissionProgressRepo::save_outcome(&mut *tx, row.id, &outcome)
                .await
                .unwrap();
            if outcome.newly_completed && saved.is_some() {
                completions += 1;
            }
        }
        tx.commit().await.unwrap();
    }
    assert_eq!(completions, 1);

    let row = MissionProgressRepo::find_for_day(&pool, user_id, mission.id, day())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.progress, 3);
    assert!(row.is_completed);
    assert!(row.completed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_outcome_skips_completed_rows(pool: PgPool) {
    let user_id = new_user(&pool, "latecomer").await;
    let missions = MissionRepo::list(&pool, false).await.unwrap();
    let mission = &missions[0];

    let mut tx = pool.begin().await.unwrap();
    let row = MissionProgressRepo::lock_or_assign(&mut *tx, user_id, mission, day())
        .await
        .unwrap();
    let done = apply_progress(row.progress, row.target_count, false, row.target_count);
    assert!(MissionProgressRepo::save_outcome(&mut *tx, row.id, &done)
        .await
        .unwrap()
        .is_some());

    // A stale writer that still believes the row is open changes nothing.
    assert!(MissionProgressRepo::save_outcome(&mut *tx, row.id, &done)
        .await
        .unwrap()
        .is_none());
    tx.commit().await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_rows_are_unique_per_day(pool: PgPool) {
    let user_id = new_user(&pool, "dupe").await;
    let mission = &MissionRepo::list(&pool, false).await.unwrap()[0];
    MissionProgressRepo::assign_missions(&pool, user_id, day(), std::slice::from_ref(mission))
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO user_mission_progress (user_id, mission_id, assigned_date) VALUES ($1, $2, $3)",
    )
    .bind(user_id)
    .bind(mission.id)
    .bind(day())
    .execute(&pool)
    .await;

    let err = result.unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(
        db_err.constraint(),
        Some("uq_user_mission_progress_user_mission_date")
    );
}
