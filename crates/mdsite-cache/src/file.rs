//! File-based artifact cache.
//!
//! Each artifact is written to a temporary file in its target directory and
//! renamed over the final path. Concurrent writers of the same key each use
//! their own temporary file, so the last rename wins and the artifact is
//! always complete.
//!
//! ```text
//! {root}/
//! +-- faq.html
//! +-- guide/
//!     +-- intro.html
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::ArtifactCache;

/// Unix permission bits applied to every artifact.
pub const ARTIFACT_MODE: u32 = 0o777;

/// Artifact cache rooted at a directory on disk.
#[derive(Clone, Debug)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `root`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the cache.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactCache for FileCache {
    fn artifact_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.html"))
    }

    fn store(&self, key: &str, html: &[u8]) -> io::Result<PathBuf> {
        let path = self.artifact_path(key);
        let parent = path
            .parent()
            .ok_or_else(|| io::Error::other(format!("artifact path has no parent: {}", path.display())))?;
        fs::create_dir_all(parent)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".artifact-")
            .suffix(".tmp")
            .tempfile_in(parent)?;
        tmp.write_all(html)?;
        tmp.flush()?;
        set_artifact_mode(tmp.path())?;
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::debug!(key, path = %path.display(), bytes = html.len(), "Stored artifact");
        Ok(path)
    }
}

#[cfg(unix)]
fn set_artifact_mode(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(ARTIFACT_MODE))
}

#[cfg(not(unix))]
fn set_artifact_mode(_path: &Path) -> io::Result<()> {
    Ok(())
}
