//! Route definitions for daily missions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::missions;
use crate::state::AppState;

/// Routes mounted at `/missions`.
///
/// ```text
/// GET  /today     -> today
/// POST /progress  -> progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/today", get(missions::today))
        .route("/progress", post(missions::progress))
}
