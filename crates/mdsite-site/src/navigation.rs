//! Sidebar navigation.
//!
//! The explorer returns `root -> groupings -> entries`. Groupings (one per
//! content root) only organize entries; the sidebar shows the entries of all
//! groupings in order.

use std::path::Path;

use mdsite_explorer::{ExplorerOptions, Node, explore};
use serde::Serialize;

/// Directories never shown in navigation.
const IGNORED_DIRS: &[&str] = &[".git"];

/// Files never shown in navigation. `/` anchors a pattern to the content root.
const IGNORED_FILES: &[&str] = &[".DS_Store", ".gitignore", "/README.md"];

/// A sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Display label.
    pub name: String,
    /// Document key (directory path for directories).
    pub link: String,
    /// True if this entry groups further entries.
    pub is_dir: bool,
    /// Nested entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

impl From<Node> for NavEntry {
    fn from(node: Node) -> Self {
        Self {
            name: node.name,
            link: node.link,
            is_dir: node.is_dir,
            children: node.children.into_iter().map(NavEntry::from).collect(),
        }
    }
}

/// Navigation built from one walk of the content tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    /// Entries of every grouping, in explorer order.
    pub entries: Vec<NavEntry>,
    /// First document of the first grouping, `None` if there is none.
    pub first: Option<Node>,
}

impl Navigation {
    /// True if the content tree holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk `content_root` and build the navigation.
///
/// A content root that cannot be read produces an empty navigation and a
/// warning; this never fails the caller.
#[must_use]
pub fn build_navigation(content_root: &Path, extension: &str) -> Navigation {
    let options = ExplorerOptions::new(vec![content_root.to_path_buf()])
        .recursive(true)
        .ignore_dirs(IGNORED_DIRS.iter().copied())
        .ignore_files(IGNORED_FILES.iter().copied())
        .extension(extension);

    let tree = match explore(&options) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::warn!(root = %content_root.display(), error = %e, "Failed to build navigation");
            return Navigation::default();
        }
    };

    let first = first_document(&tree).cloned();
    let entries = tree
        .children
        .into_iter()
        .flat_map(|group| group.children)
        .map(NavEntry::from)
        .collect();

    Navigation { entries, first }
}

/// Find the first document of the first grouping.
///
/// Descends through directories in display order until a document is found,
/// using an explicit stack rather than recursion. Returns `None` for a tree
/// without groupings or without any document in the first grouping.
#[must_use]
pub fn first_document(root: &Node) -> Option<&Node> {
    let group = root.children.first()?;
    let mut stack: Vec<&Node> = group.children.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if !node.is_dir {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }

    None
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# Doc").unwrap();
    }

    fn tree(entries: Vec<Node>) -> Node {
        Node::directory("", "", vec![Node::directory("docs", "", entries)])
    }

    #[test]
    fn test_first_document_top_level_leaf() {
        let root = tree(vec![Node::document("a", "a"), Node::document("b", "b")]);

        assert_eq!(first_document(&root).map(|n| n.link.as_str()), Some("a"));
    }

    #[test]
    fn test_first_document_descends_nested_directories() {
        let root = tree(vec![
            Node::directory(
                "guide",
                "guide",
                vec![Node::directory(
                    "basics",
                    "guide/basics",
                    vec![Node::document("install", "guide/basics/install")],
                )],
            ),
            Node::document("z", "z"),
        ]);

        assert_eq!(
            first_document(&root).map(|n| n.link.as_str()),
            Some("guide/basics/install")
        );
    }

    #[test]
    fn test_first_document_skips_empty_directory() {
        let root = tree(vec![
            Node::directory("empty", "empty", Vec::new()),
            Node::document("next", "next"),
        ]);

        assert_eq!(first_document(&root).map(|n| n.link.as_str()), Some("next"));
    }

    #[test]
    fn test_first_document_empty_tree() {
        assert!(first_document(&Node::directory("", "", Vec::new())).is_none());
        assert!(first_document(&tree(Vec::new())).is_none());
    }

    #[test]
    fn test_first_document_deep_nesting() {
        let mut node = Node::document("leaf", "leaf");
        for depth in 0..10_000 {
            node = Node::directory(format!("d{depth}"), format!("d{depth}"), vec![node]);
        }
        let root = tree(vec![node]);

        assert_eq!(first_document(&root).map(|n| n.link.as_str()), Some("leaf"));

        // Tear down iteratively; the derived Drop would recurse 10k levels deep
        let mut pending = root.children;
        while let Some(mut n) = pending.pop() {
            pending.append(&mut n.children);
        }
    }

    #[test]
    fn test_build_navigation_flattens_groupings() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "guide/intro.md");
        write(temp_dir.path(), "guide/setup.md");
        write(temp_dir.path(), "about.md");
        write(temp_dir.path(), "README.md");

        let nav = build_navigation(temp_dir.path(), "md");

        let links: Vec<_> = nav.entries.iter().map(|e| e.link.as_str()).collect();
        assert_eq!(links, vec!["about", "guide"]);
        assert_eq!(nav.entries[1].children.len(), 2);
        assert_eq!(nav.first, Some(Node::document("about", "about")));
    }

    #[test]
    fn test_build_navigation_is_stable() {
        let temp_dir = tempfile::tempdir().unwrap();
        for name in ["c.md", "a.md", "b/x.md", "b/a.md"] {
            write(temp_dir.path(), name);
        }

        let first = build_navigation(temp_dir.path(), "md");
        let second = build_navigation(temp_dir.path(), "md");

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_navigation_empty_root() {
        let temp_dir = tempfile::tempdir().unwrap();

        let nav = build_navigation(temp_dir.path(), "md");

        assert!(nav.is_empty());
        assert!(nav.first.is_none());
    }

    #[test]
    fn test_build_navigation_missing_root_degrades() {
        let nav = build_navigation(Path::new("/nonexistent/mdsite/content"), "md");

        assert_eq!(nav, Navigation::default());
    }

    #[test]
    fn test_nav_entry_serialization() {
        let entry = NavEntry::from(Node::directory(
            "guide",
            "guide",
            vec![Node::document("intro", "guide/intro")],
        ));

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["name"], "guide");
        assert_eq!(json["children"][0]["link"], "guide/intro");
        assert!(json["children"][0].get("children").is_none());
    }
}
