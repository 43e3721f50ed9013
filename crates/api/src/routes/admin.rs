//! Route definitions for the admin dashboard.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /mascot-settings     -> get_settings
/// PUT    /mascot-settings     -> update_settings
/// GET    /missions            -> list_missions
/// POST   /missions            -> create_mission
/// GET    /missions/{id}       -> get_mission
/// PUT    /missions/{id}       -> update_mission
/// DELETE /missions/{id}       -> delete_mission (deactivates)
/// GET    /users               -> list_users
/// PUT    /users/{id}/active   -> set_user_active
/// GET    /chat/stats          -> chat_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/mascot-settings",
            get(admin::get_settings).put(admin::update_settings),
        )
        .route(
            "/missions",
            get(admin::list_missions).post(admin::create_mission),
        )
        .route(
            "/missions/{id}",
            get(admin::get_mission)
                .put(admin::update_mission)
                .delete(admin::delete_mission),
        )
        .route("/users", get(admin::list_users))
        .route("/users/{id}/active", put(admin::set_user_active))
        .route("/chat/stats", get(admin::chat_stats))
}
