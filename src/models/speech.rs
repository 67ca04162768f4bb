use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A captured speech entry, immutable once written to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechEntry {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl SpeechEntry {
    /// Create an entry stamped with the current time
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Request body for saving a speech entry
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SaveSpeechRequest {
    pub text: Option<String>,
}

/// Request body for submitting a slug
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AddSlugRequest {
    pub slug: Option<String>,
}
