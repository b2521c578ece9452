//! Application state.
//!
//! Shared state for all request handlers.

use mdsite_site::{Site, SiteConfig};

use crate::ServerConfig;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Content tree, default document and render pipeline.
    pub(crate) site: Site,
    /// Site title shown in every page.
    pub(crate) title: String,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}

impl AppState {
    pub(crate) fn new(config: &ServerConfig) -> Self {
        let site = Site::new(SiteConfig {
            content_dir: config.source_dir.clone(),
            cache_dir: config.articles_dir.clone(),
            default_document: config.index.clone(),
            ..SiteConfig::default()
        });
        Self {
            site,
            title: config.title.clone(),
            version: config.version.clone(),
        }
    }
}
