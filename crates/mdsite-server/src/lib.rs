//! HTTP server for mdsite.
//!
//! Serves a directory of markdown documents as HTML pages:
//! - `GET /` and `GET /{*path}`: rendered documents inside the site layout
//! - `GET /api/navigation`: the navigation tree as JSON
//! - `GET /static/*`: files from the assets directory
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdsite_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("docs"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Request Flow
//!
//! ```text
//! GET /guide/intro
//!   -> navigation (walk content dir)
//!   -> active key (default document for "/")
//!   -> render docs/guide/intro.md -> cache/articles/guide/intro.html
//!   -> layout(navigation, active, article) -> 200
//! ```

mod app;
mod error;
mod handlers;
mod layout;
mod middleware;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use mdsite_config::DEFAULT_PORT;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Markdown source directory.
    pub source_dir: PathBuf,
    /// Directory rendered articles are written to.
    pub articles_dir: PathBuf,
    /// Directory served under `/static`.
    pub assets_dir: PathBuf,
    /// Site title shown in every page.
    pub title: String,
    /// Configured default document key.
    pub index: Option<String>,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: DEFAULT_PORT,
            source_dir: PathBuf::from("docs"),
            articles_dir: PathBuf::from("cache/articles"),
            assets_dir: PathBuf::from("web/assets"),
            title: "Docs".to_owned(),
            index: None,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(&config));
    let app = app::create_router(state, &config.assets_dir);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from mdsite config.
#[must_use]
pub fn server_config_from_config(config: &mdsite_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.effective_port(),
        source_dir: config.docs_resolved.source_dir.clone(),
        articles_dir: config.docs_resolved.articles_dir(),
        assets_dir: config.docs_resolved.assets_dir(),
        title: config.site.title.clone(),
        index: config.site.index.clone(),
        version,
    }
}
