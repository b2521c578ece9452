//! Rendered article cache for mdsite.
//!
//! Rendered documents are written to disk as plain HTML files mirroring the
//! content tree: the artifact for document key `guide/intro` lives at
//! `{root}/guide/intro.html`. The [`ArtifactCache`] trait decouples the render
//! pipeline from where artifacts end up.
//!
//! # Implementations
//!
//! - [`FileCache`]: writes artifacts under a root directory, atomically
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use mdsite_cache::{ArtifactCache, FileCache};
//!
//! let cache = FileCache::new(PathBuf::from("cache/articles"));
//! let path = cache.store("guide/intro", b"<h1>Intro</h1>")?;
//! assert_eq!(path, PathBuf::from("cache/articles/guide/intro.html"));
//! # Ok::<(), std::io::Error>(())
//! ```

mod file;
pub use file::{ARTIFACT_MODE, FileCache};

use std::io;
use std::path::PathBuf;

/// Store for rendered HTML artifacts keyed by document key.
///
/// Keys are `/`-separated paths without leading slash or extension. Callers
/// are responsible for rejecting keys that could escape the cache root.
pub trait ArtifactCache: Send + Sync {
    /// Location of the artifact for `key`, whether or not it exists yet.
    fn artifact_path(&self, key: &str) -> PathBuf;

    /// Write `html` as the artifact for `key`, replacing any previous one.
    ///
    /// Returns the artifact path on success. Readers never observe a
    /// partially written artifact.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the parent directory cannot be
    /// created or the artifact cannot be written.
    fn store(&self, key: &str, html: &[u8]) -> io::Result<PathBuf>;
}
