//! HTTP server for WSADOCS.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - Server-rendered viewer pages (navbar, sidebar menu, content)
//! - API endpoints for navigation, routes, pages and manifest refresh
//! - The viewer stylesheet, script and highlighting theme
//!
//! Everything is mounted under the configured base path.
//!
//! # Quick Start
//!
//! ```ignore
//! use wsadocs_config::Config;
//! use wsadocs_server::{run_server, server_config_from_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     let server_config = server_config_from_config(&config, "0.1.0".to_owned());
//!     run_server(server_config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (wsadocs-server)
//!                        │
//!                        ├─► Viewer pages ──► Session + Site ──► shell HTML
//!                        │
//!                        ├─► API routes ──► spawn_blocking ──► Site ──► DocSource
//!                        │
//!                        └─► Assets (compiled in)
//! ```

mod app;
pub mod assets;
mod error;
mod handlers;
mod middleware;
mod shell;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use wsadocs_config::{Config, SourceConfig, SourceLocation};
use wsadocs_site::{Site, SiteOptions};
use wsadocs_source::{DocSource, FsSource, HttpSource};

pub use error::ServerError;
pub use shell::{MenuLinks, ShellContext, render_shell};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site title shown in the navbar.
    pub site_title: String,
    /// Site behaviour (base path, placeholder texts, rendering switches).
    pub site: SiteOptions,
    /// Document source.
    pub source: SourceConfig,
    /// Syntax highlighting theme.
    pub theme: String,
    /// Application version (part of page `ETag`s).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            site_title: "WSADOCS".to_owned(),
            site: SiteOptions::default(),
            source: SourceConfig::default(),
            theme: "InspiredGitHub".to_owned(),
            version: String::new(),
        }
    }
}

/// Create server configuration from WSADOCS config.
#[must_use]
pub fn server_config_from_config(config: &Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        site_title: config.site.title.clone(),
        site: site_options(config),
        source: config.source_resolved.clone(),
        theme: config.render.theme.clone(),
        version,
    }
}

/// Site options from WSADOCS config.
#[must_use]
pub fn site_options(config: &Config) -> SiteOptions {
    SiteOptions {
        base_path: config.site.base_path.clone(),
        welcome: config.site.welcome.clone(),
        not_found: config.site.not_found.clone(),
        emoji: config.render.emoji,
        math: config.render.math,
    }
}

/// Create the document source for a source configuration.
#[must_use]
pub fn create_source(source: &SourceConfig) -> Arc<dyn DocSource> {
    match &source.location {
        SourceLocation::Dir(dir) => Arc::new(FsSource::new(dir.clone())),
        SourceLocation::Url(url) => Arc::new(HttpSource::new(url.clone(), source.timeout)),
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the highlighting theme is unknown or the server
/// fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = create_source(&config.source);
    tracing::info!(source = %source.describe(), "Using document source");

    let highlight_css = wsadocs_renderer::highlight_stylesheet(&config.theme)?;
    let site = Arc::new(Site::new(source, config.site.clone()));

    // Load the manifest up front so startup logs report problems
    let snapshot = {
        let site = Arc::clone(&site);
        tokio::task::spawn_blocking(move || site.snapshot()).await?
    };
    tracing::info!(routes = snapshot.routes().len(), "Site ready");

    let state = Arc::new(AppState {
        site,
        site_title: config.site_title.clone(),
        highlight_css,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        base_path = %config.site.base_path,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
