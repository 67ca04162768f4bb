//! Speech capture handlers

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::api::server::AppState;
use crate::error::SlugcastError;
use crate::models::{SaveSpeechRequest, SpeechEntry};

/// Persist a speech entry with the current timestamp
pub async fn save_speech(
    State(state): State<AppState>,
    Json(req): Json<SaveSpeechRequest>,
) -> Result<impl IntoResponse, SlugcastError> {
    // Empty text is treated the same as absent text.
    let text = match req.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(SlugcastError::InvalidRequest("No text received".to_string())),
    };

    state.speech_repo.append(SpeechEntry::now(text)).await?;

    info!("speech entry saved");
    Ok(Json(json!({ "message": "Saved successfully" })))
}

/// All stored speech entries, oldest first
pub async fn get_speech_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpeechEntry>>, SlugcastError> {
    let entries = state.speech_repo.read_all().await?;
    Ok(Json(entries))
}

/// Raw dump of the store file for diagnostics
pub async fn debug_data(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, SlugcastError> {
    match state.speech_repo.raw_contents().await? {
        Some(raw) => Ok(raw),
        None => Ok(format!(
            "{} does not exist",
            state.speech_repo.path().display()
        )),
    }
}
