//! Route definitions for the caller's mascot.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::mascot;
use crate::state::AppState;

/// Routes mounted at `/mascot`.
///
/// ```text
/// GET  /status  -> status
/// POST /feed    -> feed
/// POST /play    -> play
/// POST /pet     -> pet
/// GET  /chat    -> chat_history
/// POST /chat    -> chat
/// PUT  /name    -> rename
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(mascot::status))
        .route("/feed", post(mascot::feed))
        .route("/play", post(mascot::play))
        .route("/pet", post(mascot::pet))
        .route("/chat", get(mascot::chat_history).post(mascot::chat))
        .route("/name", put(mascot::rename))
}
