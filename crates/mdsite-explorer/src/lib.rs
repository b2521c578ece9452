//! Directory tree explorer for mdsite.
//!
//! Walks one or more content roots and returns a [`Node`] tree describing the
//! documents and directories beneath them. The tree has a fixed shape:
//!
//! ```text
//! (root)                 synthetic, one child per content root
//! +-- docs               grouping (a content root)
//!     +-- guide          directory entry
//!     |   +-- intro      document entry, link "guide/intro"
//!     +-- faq            document entry, link "faq"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use mdsite_explorer::{ExplorerOptions, explore};
//!
//! let options = ExplorerOptions::new(vec![PathBuf::from("docs")])
//!     .ignore_dirs([".git"])
//!     .ignore_files([".DS_Store", "/README.md"]);
//! let tree = explore(&options)?;
//! for group in &tree.children {
//!     for entry in &group.children {
//!         println!("{} -> /{}", entry.name, entry.link);
//!     }
//! }
//! # Ok::<(), mdsite_explorer::ExplorerError>(())
//! ```

mod explorer;

use std::path::PathBuf;

use serde::Serialize;

pub use explorer::{ExplorerOptions, explore};

/// A filesystem entry under a content root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Display label: file stem for documents, directory name for directories.
    pub name: String,
    /// Document key relative to the content root, without leading slash or
    /// extension (e.g. `guide/intro`). Empty for the root and groupings.
    pub link: String,
    /// True for directories and groupings.
    pub is_dir: bool,
    /// Child entries in display order. Empty for documents.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a document (leaf) node.
    #[must_use]
    pub fn document(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            is_dir: false,
            children: Vec::new(),
        }
    }

    /// Create a directory node with the given children.
    #[must_use]
    pub fn directory(name: impl Into<String>, link: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            is_dir: true,
            children,
        }
    }
}

/// Error returned when a tree cannot be explored.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// A content root could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An ignore pattern is not a valid glob.
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serialization_skips_empty_children() {
        let node = Node::document("intro", "guide/intro");

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["name"], "intro");
        assert_eq!(json["link"], "guide/intro");
        assert_eq!(json["is_dir"], false);
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_directory_node_serializes_children() {
        let node = Node::directory("guide", "guide", vec![Node::document("intro", "guide/intro")]);

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["is_dir"], true);
        assert_eq!(json["children"][0]["link"], "guide/intro");
    }
}
