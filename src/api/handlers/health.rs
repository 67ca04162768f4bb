//! Liveness and ping endpoints

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::debug;

use crate::api::server::AppState;

/// Liveness probe
pub async fn keep_alive() -> impl IntoResponse {
    Json(json!({
        "status": "alive"
    }))
}

/// Record a client ping
pub async fn ping(State(state): State<AppState>) -> impl IntoResponse {
    state.ping_tracker.record();
    debug!("ping received");
    "Pong"
}

/// Timestamp of the most recent ping, null before the first one
pub async fn last_ping(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "lastPingTime": state.ping_tracker.last()
    }))
}
