//! Register, login, and token-guarded access.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_admin, create_player, get, get_auth, post_json, put_json_auth,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_user_and_mascot(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = json!({ "username": "rainy", "email": "Rainy@Example.com", "password": "longenough1" });

    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert_eq!(json["data"]["user"]["role"], "user");
    assert_eq!(json["data"]["user"]["email"], "rainy@example.com");

    let mascots: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mascots")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(mascots, 1);

    let token = json["data"]["access_token"].as_str().unwrap();
    let me = get_auth(app, "/api/v1/auth/me", token).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_json(me).await["data"]["username"], "rainy");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "username": "drizzle", "email": "d@example.com", "password": "short" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "username": "drizzle", "email": "not-an-email", "password": "longenough1" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_is_conflict(pool: PgPool) {
    create_player(&pool, "sleet").await;
    let app = common::build_test_app(pool);
    let body = json!({ "username": "sleet", "email": "other@example.com", "password": "longenough1" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token(pool: PgPool) {
    let (user, _) = create_player(&pool, "hail").await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": "hail", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert_eq!(json["data"]["expires_in"], 3600);
    assert_eq!(json["data"]["user"]["id"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    create_player(&pool, "fog").await;
    let app = common::build_test_app(pool);
    let body = json!({ "username": "fog", "password": "definitely-wrong" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_user_cannot_log_in(pool: PgPool) {
    let (_admin, admin_token) = create_admin(&pool, "boss").await;
    let (user, _) = create_player(&pool, "gust").await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/admin/users/{}/active", user.id);
    let response = put_json_auth(app.clone(), &uri, json!({ "is_active": false }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = json!({ "username": "gust", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_require_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/mascot/status").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/mascot/status", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_regular_users(pool: PgPool) {
    let (_user, token) = create_player(&pool, "breeze").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/mascot-settings", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
