//! Default document selection and request path resolution.

use std::sync::OnceLock;

use mdsite_explorer::Node;

/// The document served for the root path.
///
/// A configured key always wins. Without one, the first document found in the
/// content tree is adopted on first use and kept for the life of the process,
/// even if the tree later changes.
#[derive(Debug, Default)]
pub struct DefaultDocument {
    configured: Option<String>,
    detected: OnceLock<String>,
}

impl DefaultDocument {
    /// Create a default document. An empty configured key counts as unset.
    #[must_use]
    pub fn new(configured: Option<String>) -> Self {
        Self {
            configured: configured.filter(|key| !key.is_empty()),
            detected: OnceLock::new(),
        }
    }

    /// Current default key, adopting `first` if none is set yet.
    ///
    /// Returns `None` only while no key is configured and no document has
    /// ever been seen.
    pub fn resolve(&self, first: Option<&Node>) -> Option<&str> {
        if let Some(key) = &self.configured {
            return Some(key.as_str());
        }
        if self.detected.get().is_none()
            && let Some(node) = first
            && self.detected.set(node.link.clone()).is_ok()
        {
            tracing::info!(key = %node.link, "Default document detected");
        }
        self.detected.get().map(String::as_str)
    }

    /// Current default key without adopting anything.
    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.configured.as_deref().or_else(|| self.detected.get().map(String::as_str))
    }
}

/// Map a request path to a document key.
///
/// The leading `/` is dropped. An empty remainder selects `default`, or the
/// empty key when there is none.
#[must_use]
pub fn resolve_active<'a>(request_path: &'a str, default: Option<&'a str>) -> &'a str {
    let key = request_path.strip_prefix('/').unwrap_or(request_path);
    if key.is_empty() { default.unwrap_or("") } else { key }
}
