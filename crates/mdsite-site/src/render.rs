//! Document rendering into the artifact cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mdsite_cache::ArtifactCache;
use mdsite_renderer::HtmlRenderer;

use crate::key::is_safe_key;

/// Error returned when a document cannot be rendered.
///
/// Every variant carries the request path that triggered the render so the
/// caller can report it.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No source file exists for the key.
    #[error("Source not found: {}", source_path.display())]
    SourceNotFound {
        /// Source file that was looked up.
        source_path: PathBuf,
        /// Request path being served.
        request_path: String,
    },
    /// The source file exists but could not be read.
    #[error("Failed to read {}: {source}", source_path.display())]
    SourceRead {
        /// Source file that failed.
        source_path: PathBuf,
        /// Request path being served.
        request_path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The rendered artifact could not be written.
    #[error("Failed to write {}: {source}", artifact_path.display())]
    CacheWrite {
        /// Artifact that failed.
        artifact_path: PathBuf,
        /// Request path being served.
        request_path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// True if the document does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }

    /// Request path the failed render was serving.
    #[must_use]
    pub fn request_path(&self) -> &str {
        match self {
            Self::SourceNotFound { request_path, .. }
            | Self::SourceRead { request_path, .. }
            | Self::CacheWrite { request_path, .. } => request_path,
        }
    }
}

/// Renders document keys from a content directory into an artifact cache.
///
/// Every call reads the source again and overwrites the artifact; nothing is
/// skipped based on an existing artifact.
pub struct RenderPipeline {
    content_dir: PathBuf,
    extension: String,
    renderer: HtmlRenderer,
    cache: Arc<dyn ArtifactCache>,
}

impl RenderPipeline {
    /// Create a pipeline reading `.md` sources from `content_dir`.
    #[must_use]
    pub fn new(content_dir: PathBuf, cache: Arc<dyn ArtifactCache>) -> Self {
        Self {
            content_dir,
            extension: "md".to_owned(),
            renderer: HtmlRenderer::new(),
            cache,
        }
    }

    /// Set the source file extension (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Content directory sources are read from.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Source file for a document key.
    #[must_use]
    pub fn source_path(&self, key: &str) -> PathBuf {
        self.content_dir.join(format!("{key}.{}", self.extension))
    }

    /// Render `key` and write its artifact.
    ///
    /// Returns the artifact path. `request_path` is only used for reporting.
    ///
    /// # Errors
    ///
    /// - [`RenderError::SourceNotFound`] if the key is unsafe or has no source
    ///   file; nothing is written in that case
    /// - [`RenderError::SourceRead`] if the source cannot be read
    /// - [`RenderError::CacheWrite`] if the artifact cannot be written
    pub fn render(&self, key: &str, request_path: &str) -> Result<PathBuf, RenderError> {
        let source_path = self.source_path(key);

        if !is_safe_key(key) {
            tracing::debug!(key, request_path, "Rejected document key");
            return Err(RenderError::SourceNotFound {
                source_path,
                request_path: request_path.to_owned(),
            });
        }

        match fs::metadata(&source_path) {
            Ok(meta) if meta.is_file() => {}
            _ => {
                return Err(RenderError::SourceNotFound {
                    source_path,
                    request_path: request_path.to_owned(),
                });
            }
        }

        let source = fs::read(&source_path).map_err(|source| RenderError::SourceRead {
            source_path: source_path.clone(),
            request_path: request_path.to_owned(),
            source,
        })?;

        let html = self.renderer.render(&source);

        let artifact_path = self
            .cache
            .store(key, html.as_bytes())
            .map_err(|source| RenderError::CacheWrite {
                artifact_path: self.cache.artifact_path(key),
                request_path: request_path.to_owned(),
                source,
            })?;

        tracing::debug!(key, source = %source_path.display(), bytes = html.len(), "Rendered document");
        Ok(artifact_path)
    }
}
