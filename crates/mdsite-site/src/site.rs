//! Site facade.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mdsite_cache::{ArtifactCache, FileCache};

use crate::default_document::DefaultDocument;
use crate::navigation::{Navigation, build_navigation};
use crate::render::{RenderError, RenderPipeline};

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Directory holding the markdown sources.
    pub content_dir: PathBuf,
    /// Directory rendered artifacts are written to.
    pub cache_dir: PathBuf,
    /// Document served for `/`. Detected from the content tree if `None`.
    pub default_document: Option<String>,
    /// Source file extension (without the dot).
    pub extension: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("docs"),
            cache_dir: PathBuf::from("cache/articles"),
            default_document: None,
            extension: "md".to_owned(),
        }
    }
}

/// A markdown site: one content directory, one artifact cache.
///
/// Thread-safe; share it behind an `Arc`. Navigation is rebuilt on every
/// call so new and removed documents show up without a restart.
pub struct Site {
    content_dir: PathBuf,
    extension: String,
    default_document: DefaultDocument,
    pipeline: RenderPipeline,
}

impl Site {
    /// Create a site writing artifacts to a [`FileCache`] at `config.cache_dir`.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let cache = Arc::new(FileCache::new(config.cache_dir.clone()));
        Self::with_cache(config, cache)
    }

    /// Create a site with a custom artifact cache.
    #[must_use]
    pub fn with_cache(config: SiteConfig, cache: Arc<dyn ArtifactCache>) -> Self {
        let pipeline =
            RenderPipeline::new(config.content_dir.clone(), cache).with_extension(config.extension.clone());
        Self {
            content_dir: config.content_dir,
            extension: config.extension,
            default_document: DefaultDocument::new(config.default_document),
            pipeline,
        }
    }

    /// Content directory.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Build navigation from the current state of the content directory.
    #[must_use]
    pub fn navigation(&self) -> Navigation {
        build_navigation(&self.content_dir, &self.extension)
    }

    /// Default document key, adopting the first document of `navigation` if
    /// none has been chosen yet.
    pub fn default_document(&self, navigation: &Navigation) -> Option<&str> {
        self.default_document.resolve(navigation.first.as_ref())
    }

    /// Render a document key into the artifact cache.
    ///
    /// # Errors
    ///
    /// See [`RenderPipeline::render`].
    pub fn render(&self, key: &str, request_path: &str) -> Result<PathBuf, RenderError> {
        self.pipeline.render(key, request_path)
    }
}
