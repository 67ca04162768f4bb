//! Slug event stream
//!
//! Long-lived SSE connection pushing slug events to a browser. The hub
//! registration lives inside the response stream, so dropping the response
//! (client disconnect) unregisters the subscriber.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tracing::debug;

use crate::api::server::AppState;
use crate::broadcast::SlugEvent;

/// SSE endpoint streaming slug events
pub async fn slug_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut subscription = state.broadcaster.register();

    let stream = async_stream::stream! {
        while let Some(event) = subscription.recv().await {
            yield Ok(sse_frame(&event));
        }
        debug!("slug event stream ended");
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Wire framing: a new slug is a data-only message carrying the
/// JSON-encoded slug; a reset is a named `clearSlugs` event with an empty
/// object payload.
fn sse_frame(event: &SlugEvent) -> Event {
    match event {
        SlugEvent::NewSlug(slug) => {
            let payload =
                serde_json::to_string(slug).unwrap_or_else(|_| "\"\"".to_string());
            Event::default().data(payload)
        }
        SlugEvent::ClearSlugs => Event::default().event("clearSlugs").data("{}"),
    }
}
