//! Filesystem walking.
//!
//! Only the content roots themselves are required to be readable. A nested
//! directory that cannot be listed is skipped with a warning so one bad
//! permission bit does not take the whole navigation down.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::{ExplorerError, Node};

/// Options controlling a tree walk.
#[derive(Clone, Debug)]
pub struct ExplorerOptions {
    /// Content roots, one grouping per root in the returned tree.
    pub roots: Vec<PathBuf>,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Directory patterns to skip.
    pub ignore_dirs: Vec<String>,
    /// File patterns to skip.
    pub ignore_files: Vec<String>,
    /// Extension of document files (without the dot).
    pub extension: String,
}

impl ExplorerOptions {
    /// Recursive walk of `roots` with no ignore rules and the `md` extension.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            recursive: true,
            ignore_dirs: Vec::new(),
            ignore_files: Vec::new(),
            extension: "md".to_owned(),
        }
    }

    /// Set whether subdirectories are descended.
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Add directory ignore patterns.
    ///
    /// Patterns starting with `/` are matched against the root-relative path,
    /// all others against the directory name at any depth.
    #[must_use]
    pub fn ignore_dirs<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_dirs.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add file ignore patterns (same anchoring rules as [`Self::ignore_dirs`]).
    #[must_use]
    pub fn ignore_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_files.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set the document extension.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Explore all configured roots and build the navigation tree.
///
/// Entries are sorted by file name. Only files with the configured extension
/// become documents, and directories without any document beneath them are
/// left out.
///
/// # Errors
///
/// Returns [`ExplorerError::ReadDir`] if a root cannot be listed, or
/// [`ExplorerError::Pattern`] if an ignore pattern is malformed.
pub fn explore(options: &ExplorerOptions) -> Result<Node, ExplorerError> {
    let walker = Walker {
        recursive: options.recursive,
        ignore_dirs: compile_rules(&options.ignore_dirs)?,
        ignore_files: compile_rules(&options.ignore_files)?,
        extension: &options.extension,
    };

    let mut groups = Vec::with_capacity(options.roots.len());
    for root in &options.roots {
        let entries = fs::read_dir(root).map_err(|source| ExplorerError::ReadDir {
            path: root.clone(),
            source,
        })?;
        let children = walker.walk_entries(entries, "");
        let name = root
            .file_name()
            .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());
        groups.push(Node::directory(name, "", children));
    }

    Ok(Node::directory("", "", groups))
}

/// A compiled ignore pattern.
struct IgnoreRule {
    pattern: Pattern,
    anchored: bool,
}

impl IgnoreRule {
    fn matches(&self, name: &str, rel_path: &str) -> bool {
        if self.anchored {
            self.pattern.matches(rel_path)
        } else {
            self.pattern.matches(name)
        }
    }
}

fn compile_rules(patterns: &[String]) -> Result<Vec<IgnoreRule>, ExplorerError> {
    patterns
        .iter()
        .map(|raw| {
            let (text, anchored) = match raw.strip_prefix('/') {
                Some(rest) => (rest, true),
                None => (raw.as_str(), false),
            };
            let pattern = Pattern::new(text).map_err(|source| ExplorerError::Pattern {
                pattern: raw.clone(),
                source,
            })?;
            Ok(IgnoreRule { pattern, anchored })
        })
        .collect()
}

struct Walker<'a> {
    recursive: bool,
    ignore_dirs: Vec<IgnoreRule>,
    ignore_files: Vec<IgnoreRule>,
    extension: &'a str,
}

impl Walker<'_> {
    fn walk_dir(&self, dir: &Path, rel_prefix: &str) -> Vec<Node> {
        match fs::read_dir(dir) {
            Ok(entries) => self.walk_entries(entries, rel_prefix),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Skipping unreadable directory");
                Vec::new()
            }
        }
    }

    fn walk_entries(&self, entries: fs::ReadDir, rel_prefix: &str) -> Vec<Node> {
        // file_type() does not follow symlinks, so symlinked directories are
        // never descended and cycles cannot occur.
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .filter_map(|e| {
                let name = e.file_name().into_string().ok()?;
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                Some((name, e.path(), is_dir))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut nodes = Vec::new();
        for (name, path, is_dir) in entries {
            let rel_path = join_rel(rel_prefix, &name);

            if is_dir {
                if !self.recursive || is_ignored(&self.ignore_dirs, &name, &rel_path) {
                    continue;
                }
                let children = self.walk_dir(&path, &rel_path);
                if !children.is_empty() {
                    nodes.push(Node::directory(name, rel_path, children));
                }
            } else {
                if is_ignored(&self.ignore_files, &name, &rel_path) {
                    continue;
                }
                if let Some(stem) = self.document_stem(&name) {
                    nodes.push(Node::document(stem, join_rel(rel_prefix, stem)));
                }
            }
        }
        nodes
    }

    /// File stem if `name` carries the document extension.
    fn document_stem<'n>(&self, name: &'n str) -> Option<&'n str> {
        let (stem, ext) = name.rsplit_once('.')?;
        (ext == self.extension && !stem.is_empty()).then_some(stem)
    }
}

fn is_ignored(rules: &[IgnoreRule], name: &str, rel_path: &str) -> bool {
    rules.iter().any(|rule| rule.matches(name, rel_path))
}

fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
