use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unified error type for the Slugcast application
#[derive(Error, Debug)]
pub enum SlugcastError {
    // Request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt store file: {0}")]
    CorruptStore(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Slugcast operations
pub type Result<T> = std::result::Result<T, SlugcastError>;

impl SlugcastError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            SlugcastError::InvalidRequest(_) | SlugcastError::InvalidConfig(_) => {
                StatusCode::BAD_REQUEST
            }

            // 500 Internal Server Error
            SlugcastError::Storage(_)
            | SlugcastError::CorruptStore(_)
            | SlugcastError::Io(_)
            | SlugcastError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

// Implement IntoResponse for API error responses
impl IntoResponse for SlugcastError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage details stay in the logs; clients get a generic message.
        let message = if self.is_server_error() {
            tracing::error!("request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}

// Convert from serde_json errors raised while encoding/decoding the store
impl From<serde_json::Error> for SlugcastError {
    fn from(err: serde_json::Error) -> Self {
        SlugcastError::CorruptStore(err.to_string())
    }
}
