pub mod admin;
pub mod auth;
pub mod health;
pub mod mascot;
pub mod missions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/me                         current user (requires auth)
///
/// /mascot/status                   mascot snapshot with resolved form
/// /mascot/feed                     feed (POST)
/// /mascot/play                     play (POST)
/// /mascot/pet                      pet (POST)
/// /mascot/chat                     history (GET), send message (POST)
/// /mascot/name                     rename (PUT)
///
/// /missions/today                  today's missions with progress
/// /missions/progress               report progress (POST)
///
/// /admin/mascot-settings           get, update (admin only)
/// /admin/missions                  list, create
/// /admin/missions/{id}             get, update, deactivate
/// /admin/users                     list with mascot summary
/// /admin/users/{id}/active         activate / deactivate (PUT)
/// /admin/chat/stats                chat analytics (?days=N)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/mascot", mascot::router())
        .nest("/missions", missions::router())
        .nest("/admin", admin::router())
}
