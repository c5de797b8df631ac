//! HTTP server for rbook.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - API endpoints for site config, sidebar, route table and page resolution
//! - WebSocket endpoint for live reload of the sidebar during development
//!
//! # Quick Start
//!
//! ```ignore
//! use rbook_config::Config;
//! use rbook_server::{run_server, server_config_from_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     run_server(server_config_from_config(&config)).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (rbook-server)
//!                        │
//!                        ├─► API routes ──► Site snapshot (rbook-site)
//!                        │
//!                        └─► WebSocket (LiveReloadManager)
//!                                │
//!                                └─► notify watcher on the sidebar file
//! ```

mod app;
mod error;
mod handlers;
mod live_reload;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use rbook_config::{Config, SiteConfig};
use rbook_site::{FsSidebarSource, Site};
use state::AppState;
use tokio::sync::broadcast;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Authored sidebar file.
    pub sidebar: PathBuf,
    /// Directory routes resolve against for markdown documents.
    pub source_dir: PathBuf,
    /// Enable live reload.
    pub live_reload_enabled: bool,
    /// Presentation settings for the active build mode.
    pub site: SiteConfig,
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the sidebar fails to load or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let source = FsSidebarSource::new(config.sidebar.clone())?;
    let site = Arc::new(Site::load(Box::new(source), config.source_dir.clone())?);

    let live_reload = if config.live_reload_enabled {
        let (tx, _rx) = broadcast::channel::<live_reload::ReloadEvent>(100);
        let mut manager =
            live_reload::LiveReloadManager::new(config.sidebar.clone(), Arc::clone(&site), tx);
        manager.start()?;
        Some(manager)
    } else {
        None
    };

    let state = Arc::new(AppState {
        site,
        site_config: Arc::new(config.site),
        live_reload,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from rbook config.
#[must_use]
pub fn server_config_from_config(config: &Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        sidebar: config.docs_resolved.sidebar.clone(),
        source_dir: config.docs_resolved.source_dir.clone(),
        live_reload_enabled: config.live_reload.enabled,
        site: config.site(),
    }
}
