//! API server using Axum
//!
//! Wires the handlers, the slug event stream, and the static assets into
//! one router and serves it with graceful shutdown.

use std::net::SocketAddr;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::broadcast::SlugBroadcaster;
use crate::config::{Config, ServerConfig};
use crate::error::{Result, SlugcastError};
use crate::models::{PingTracker, SlugBoard};
use crate::repository::SpeechRepository;

use super::middleware::{canonical_host_redirect, cors_layer};
use super::routes;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub speech_repo: SpeechRepository,
    pub broadcaster: SlugBroadcaster,
    pub slug_board: SlugBoard,
    pub ping_tracker: PingTracker,
}

/// API server
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: Config, speech_repo: SpeechRepository, broadcaster: SlugBroadcaster) -> Self {
        let server_config = config.server.clone();

        let state = AppState {
            config,
            speech_repo,
            broadcaster,
            slug_board: SlugBoard::new(),
            ping_tracker: PingTracker::new(),
        };

        Self {
            config: server_config,
            state,
        }
    }

    /// Build the router
    fn build_router(&self) -> Router {
        let cors = cors_layer(&self.config.cors_origins);

        routes::create_router(self.state.clone())
            .layer(cors)
            .layer(axum::middleware::from_fn_with_state(
                self.config.canonical_host.clone(),
                canonical_host_redirect,
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                SlugcastError::InvalidConfig(format!(
                    "Invalid server address {}:{}",
                    self.config.host, self.config.port
                ))
            })?;

        let router = self.build_router();

        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await
            .map_err(|e| SlugcastError::Internal(e.to_string()))?;

        info!("Server shut down");
        Ok(())
    }
}
