use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted internally and the config
/// sits behind an `Arc`. Mascot settings are deliberately not cached here;
/// handlers load them per request so admin edits apply immediately.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: weatherpet_db::DbPool,
    /// Server configuration (JWT secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
}
