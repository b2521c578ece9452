//! Navigation, path resolution and cached page rendering for mdsite.
//!
//! This crate provides:
//! - [`build_navigation`]: sidebar entries and the first document of a content tree
//! - [`DefaultDocument`]: the document served for the root path
//! - [`resolve_active`]: request path to document key
//! - [`RenderPipeline`]: source lookup, markdown rendering, artifact write
//! - [`Site`]: all of the above bound to one content root and cache root
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use mdsite_site::{Site, SiteConfig, resolve_active};
//!
//! let site = Site::new(SiteConfig {
//!     content_dir: PathBuf::from("docs"),
//!     cache_dir: PathBuf::from("cache/articles"),
//!     ..SiteConfig::default()
//! });
//!
//! let navigation = site.navigation();
//! let default = site.default_document(&navigation);
//! let key = resolve_active("", default);
//! let artifact = site.render(key, "/")?;
//! # Ok(())
//! # }
//! ```

mod default_document;
mod key;
mod navigation;
mod render;
mod site;

pub use default_document::{DefaultDocument, resolve_active};
pub use key::is_safe_key;
pub use navigation::{NavEntry, Navigation, build_navigation, first_document};
pub use render::{RenderError, RenderPipeline};
pub use site::{Site, SiteConfig};

// Re-export the explorer node for convenience
pub use mdsite_explorer::Node;
