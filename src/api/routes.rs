//! API route definitions

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use super::handlers;
use super::server::AppState;
use super::sse;

/// Create the API router with all routes
///
/// Unmatched paths fall through to the static assets, with index.html as
/// the final catch-all.
pub fn create_router(state: AppState) -> Router {
    let public_dir = &state.config.server.public_dir;
    let static_assets =
        ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        // Slug board
        .route("/api/add-slug", post(handlers::slugs::add_slug))
        .route("/api/reset-slugs", get(handlers::slugs::reset_slugs))
        .route("/sse/slugs", get(sse::slugs::slug_stream))
        // Speech capture
        .route("/saveSpeech", post(handlers::speech::save_speech))
        .route("/getSpeechData", get(handlers::speech::get_speech_data))
        .route("/debug-data", get(handlers::speech::debug_data))
        // Liveness
        .route("/keep-alive", get(handlers::health::keep_alive))
        .route("/ping", get(handlers::health::ping))
        .route("/last-ping", get(handlers::health::last_ping))
        .fallback_service(static_assets)
        .with_state(state)
}
