//! Proxy server
//!
//! Exposes the two Marketing Cloud calls to a browser front-end (which cannot
//! call the tenant endpoints directly) and serves the prebuilt bundle for
//! every other path.

pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::config::Config;

pub use routes::build_router;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            http: config.http_client()?,
            config: Arc::new(config),
        })
    }
}

/// Bind on all interfaces and serve until the process is stopped
pub async fn serve(config: Config) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let static_dir = config.server.static_dir.clone();
    let state = AppState::new(config)?;
    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    if !static_dir.exists() {
        log::warn!("Static directory {} does not exist; only the API is served", static_dir.display());
    }
    log::info!("Server running on port {}", addr.port());

    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")
}
