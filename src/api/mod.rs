//! API server implementation
//!
//! Provides the HTTP endpoints, the slug event stream, and static assets.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod sse;

pub use server::ApiServer;
