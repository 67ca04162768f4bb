//! Slugcast - Live slug broadcast and speech capture backend
//!
//! A small web backend that accepts short text/slug submissions over HTTP,
//! persists speech entries to a flat JSON file, and pushes newly added
//! slugs to connected browsers over Server-Sent Events.
//!
//! ## Features
//!
//! - Slug submissions fanned out live to every open `/sse/slugs` stream
//! - In-memory slug board with an explicit reset that clears all displays
//! - Speech entries persisted to a bounded JSON file log (oldest evicted)
//! - Static asset serving with an index.html catch-all
//! - Optional canonical-host redirect

pub mod api;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub use broadcast::{SlugBroadcaster, SlugEvent};
pub use config::Config;
pub use error::{Result, SlugcastError};
pub use repository::SpeechRepository;
