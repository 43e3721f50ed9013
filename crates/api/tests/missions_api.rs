//! Daily mission listing and progress reporting over HTTP.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_player, delete_auth, get_auth, post_auth, post_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

/// Fetch today's missions and return the one with the given name.
async fn today_mission(app: axum::Router, token: &str, name: &str) -> Value {
    let response = get_auth(app, "/api/v1/missions/today", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    data["missions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == name)
        .cloned()
        .unwrap_or_else(|| panic!("mission {name} not listed"))
}

async fn report(app: axum::Router, token: &str, mission_id: &Value, increment: i32) -> Value {
    let response = post_json_auth(
        app,
        "/api/v1/missions/progress",
        json!({ "mission_id": mission_id, "increment": increment }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn today_assigns_every_active_mission(pool: PgPool) {
    let (user, token) = create_player(&pool, "early").await;
    let app = common::build_test_app(pool.clone());

    let response = get_auth(app.clone(), "/api/v1/missions/today", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    let missions = data["missions"].as_array().unwrap();
    assert_eq!(missions.len(), 5);
    assert_eq!(data["completed_count"], 0);
    assert!(missions.iter().all(|m| m["progress"] == 0));

    let playtime = missions.iter().find(|m| m["name"] == "Playtime").unwrap();
    assert_eq!(playtime["target_count"], 3);

    // Listing again does not duplicate rows.
    get_auth(app, "/api/v1/missions/today", &token).await;
    let rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_mission_progress WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(rows, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn three_step_mission_credits_reward_once(pool: PgPool) {
    let (_user, token) = create_player(&pool, "stepper").await;
    let app = common::build_test_app(pool);
    let mission = today_mission(app.clone(), &token, "Playtime").await;
    let id = mission["mission_id"].clone();

    let first = report(app.clone(), &token, &id, 1).await;
    assert_eq!(first["progress"]["progress"], 1);
    assert_eq!(first["progress"]["is_completed"], false);

    report(app.clone(), &token, &id, 1).await;
    let third = report(app.clone(), &token, &id, 1).await;
    assert_eq!(third["progress"]["is_completed"], true);
    assert_eq!(third["progress"]["newly_completed"], true);
    assert_eq!(third["progress"]["reward_exp"], 30);
    assert_eq!(third["mascot"]["experience"], 30);

    let fourth = report(app, &token, &id, 1).await;
    assert_eq!(fourth["progress"]["progress"], 3);
    assert_eq!(fourth["progress"]["newly_completed"], false);
    assert_eq!(fourth["progress"]["reward_exp"], 0);
    assert_eq!(fourth["mascot"]["experience"], 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn touch_count_is_the_increment(pool: PgPool) {
    let (_user, token) = create_player(&pool, "toucher").await;
    let app = common::build_test_app(pool);
    let mission = today_mission(app.clone(), &token, "Gentle touch").await;

    let data = report(app.clone(), &token, &mission["mission_id"], 7).await;
    // Clamped at the target of 5.
    assert_eq!(data["progress"]["progress"], 5);
    assert_eq!(data["progress"]["is_completed"], true);
    assert_eq!(data["mascot"]["experience"], 20);

    let mission = today_mission(app, &token, "Gentle touch").await;
    assert_eq!(mission["is_completed"], true);
    assert!(mission["completed_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn interactions_advance_matching_missions(pool: PgPool) {
    let (_user, token) = create_player(&pool, "talker").await;
    let app = common::build_test_app(pool);

    for _ in 0..2 {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/mascot/chat",
            json!({ "message": "hello" }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    post_auth(app.clone(), "/api/v1/mascot/play", &token).await;

    let small_talk = today_mission(app.clone(), &token, "Small talk").await;
    assert_eq!(small_talk["progress"], 2);
    assert_eq!(small_talk["is_completed"], true);

    let playtime = today_mission(app, &token, "Playtime").await;
    assert_eq!(playtime["progress"], 1);
    assert_eq!(playtime["is_completed"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_validates_increment(pool: PgPool) {
    let (_user, token) = create_player(&pool, "cheater").await;
    let app = common::build_test_app(pool);
    let mission = today_mission(app.clone(), &token, "Gentle touch").await;

    for increment in [0, -1, 101] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/missions/progress",
            json!({ "mission_id": mission["mission_id"], "increment": increment }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "increment {increment}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_mission_is_404(pool: PgPool) {
    let (_user, token) = create_player(&pool, "lost").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/missions/progress",
        json!({ "mission_id": 999_999, "increment": 1 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_mission_is_hidden_and_rejected(pool: PgPool) {
    let (_admin, admin_token) = common::create_admin(&pool, "curator").await;
    let (_user, token) = create_player(&pool, "watcher").await;
    let app = common::build_test_app(pool);
    let mission = today_mission(app.clone(), &token, "Weather watcher").await;
    let id = mission["mission_id"].as_i64().unwrap();

    let uri = format!("/api/v1/admin/missions/{id}");
    let response = delete_auth(app.clone(), &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), "/api/v1/missions/today", &token).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["missions"].as_array().unwrap().len(), 4);

    let response = post_json_auth(
        app,
        "/api/v1/missions/progress",
        json!({ "mission_id": id, "increment": 1 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
