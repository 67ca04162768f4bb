//! Slug submission handlers

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use crate::api::server::AppState;
use crate::broadcast::SlugEvent;
use crate::error::SlugcastError;
use crate::models::AddSlugRequest;

/// Append a slug to the board and broadcast it to open streams
pub async fn add_slug(
    State(state): State<AppState>,
    Json(req): Json<AddSlugRequest>,
) -> Result<impl IntoResponse, SlugcastError> {
    let slug = req
        .slug
        .ok_or_else(|| SlugcastError::InvalidRequest("Missing slug".to_string()))?;

    state.slug_board.add(slug.clone());
    state.broadcaster.publish(SlugEvent::NewSlug(slug.clone()));

    info!(
        %slug,
        board = state.slug_board.len(),
        subscribers = state.broadcaster.subscriber_count(),
        "slug added"
    );

    Ok("Slug added")
}

/// Clear the board and tell every open stream to wipe its display
pub async fn reset_slugs(State(state): State<AppState>) -> impl IntoResponse {
    state.slug_board.reset();
    state.broadcaster.publish(SlugEvent::ClearSlugs);

    info!(
        subscribers = state.broadcaster.subscriber_count(),
        "slug board reset"
    );

    "Slugs reset"
}
