//! Slug event broadcast hub
//!
//! Fans out slug events to every open subscriber stream. Uses bounded
//! per-subscriber channels with try_send to prevent memory leaks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Maximum number of events to buffer per subscriber connection
pub const SUBSCRIBER_BUFFER_SIZE: usize = 256;

/// Events fanned out to connected slug stream subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugEvent {
    /// A slug was submitted
    NewSlug(String),
    /// The slug list was reset
    ClearSlugs,
}

struct Registry {
    subscribers: DashMap<u64, mpsc::Sender<SlugEvent>>,
    next_id: AtomicU64,
}

/// Fan-out hub for slug events. Cloneable - store in AppState.
#[derive(Clone)]
pub struct SlugBroadcaster {
    registry: Arc<Registry>,
}

impl SlugBroadcaster {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                subscribers: DashMap::new(),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Add a subscriber to the live set.
    ///
    /// The subscriber receives every event published from this point on.
    /// Dropping the returned [`Subscription`] removes it again.
    pub fn register(&self) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER_SIZE);
        self.registry.subscribers.insert(id, tx);

        debug!(
            id,
            subscribers = self.subscriber_count(),
            "slug subscriber registered"
        );

        Subscription {
            id,
            rx,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Deliver an event to every currently registered subscriber.
    ///
    /// A full or closed subscriber never aborts delivery to the others;
    /// closed ones are pruned after the fan-out.
    pub fn publish(&self, event: SlugEvent) {
        let mut dead = Vec::new();

        for entry in self.registry.subscribers.iter() {
            match entry.value().try_send(event.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!(id = *entry.key(), "subscriber buffer full, dropping event");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    dead.push(*entry.key());
                }
            }
        }

        // Removing while iterating a DashMap shard deadlocks, so prune after.
        for id in dead {
            self.registry.subscribers.remove(&id);
            warn!(id, "pruned dead slug subscriber");
        }
    }

    /// Number of currently registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers.len()
    }
}

impl Default for SlugBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// A live registration in the hub.
///
/// Dropping the subscription unregisters it; unregistration is idempotent
/// (publish may already have pruned a closed subscriber).
pub struct Subscription {
    id: u64,
    rx: mpsc::Receiver<SlugEvent>,
    registry: Arc<Registry>,
}

impl Subscription {
    /// Receive the next event, or `None` once unregistered with an empty buffer
    pub async fn recv(&mut self) -> Option<SlugEvent> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.subscribers.remove(&self.id);
        debug!(
            id = self.id,
            subscribers = self.registry.subscribers.len(),
            "slug subscriber unregistered"
        );
    }
}
