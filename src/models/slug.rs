//! Process-scoped in-memory state
//!
//! The slug list and the last probe timestamp live only for the lifetime of
//! the process: empty at startup, no teardown beyond process exit.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// The in-memory list of submitted slugs. Cloneable - store in AppState.
#[derive(Clone, Default)]
pub struct SlugBoard {
    slugs: Arc<Mutex<Vec<String>>>,
}

impl SlugBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slug to the board
    pub fn add(&self, slug: impl Into<String>) {
        self.slugs.lock().push(slug.into());
    }

    /// Drop all slugs
    pub fn reset(&self) {
        self.slugs.lock().clear();
    }

    /// Number of slugs currently on the board
    pub fn len(&self) -> usize {
        self.slugs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.lock().is_empty()
    }
}

/// Tracks the timestamp of the most recent client ping
#[derive(Clone, Default)]
pub struct PingTracker {
    last: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl PingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ping at the current time
    pub fn record(&self) {
        *self.last.lock() = Some(Utc::now());
    }

    /// Timestamp of the last recorded ping, if any
    pub fn last(&self) -> Option<DateTime<Utc>> {
        *self.last.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_board_add_and_reset() {
        let board = SlugBoard::new();
        assert!(board.is_empty());

        board.add("foo");
        board.add("bar");
        assert_eq!(board.len(), 2);

        board.reset();
        assert!(board.is_empty());
    }

    #[test]
    fn test_ping_tracker_starts_empty() {
        let tracker = PingTracker::new();
        assert!(tracker.last().is_none());

        tracker.record();
        assert!(tracker.last().is_some());
    }
}
