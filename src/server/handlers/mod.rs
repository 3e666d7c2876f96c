//! HTTP handlers for the server.

pub mod order;

use axum::extract::State;
use std::sync::Arc;

use super::state::AppState;

/// Handle GET /health.
pub async fn health(State(state): State<Arc<AppState>>) -> String {
    format!(
        "ok (listening on {}, up since {})",
        state.config.listen_addr, state.boot_time
    )
}
