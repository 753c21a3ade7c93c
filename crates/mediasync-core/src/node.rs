//! Directory and file node types.

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Index of a directory node within its owning [`Tree`](crate::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DirId(pub usize);

impl DirId {
    /// The root directory of any non-empty tree.
    pub const ROOT: DirId = DirId(0);

    /// Create a new DirId from an arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }
}

/// Index of a file node within its owning [`Tree`](crate::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub usize);

impl FileId {
    /// Create a new FileId from an arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }
}

/// A directory in the tree.
///
/// Children and files are keyed by title, so siblings never share a name.
/// Iteration follows insertion (discovery) order.
#[derive(Debug, Clone)]
pub struct DirNode {
    title: CompactString,
    parent: Option<DirId>,
    children: IndexMap<CompactString, DirId>,
    files: IndexMap<CompactString, FileId>,
    excluded: bool,
}

impl DirNode {
    pub(crate) fn new(title: impl Into<CompactString>, parent: Option<DirId>) -> Self {
        Self {
            title: title.into(),
            parent,
            children: IndexMap::new(),
            files: IndexMap::new(),
            excluded: false,
        }
    }

    /// Final path segment; empty only for the root.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Owning directory, `None` for the root.
    pub fn parent(&self) -> Option<DirId> {
        self.parent
    }

    /// Whether the directory record is marked excluded from tracking.
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Check if this is the root directory.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Look up an immediate child directory by title.
    pub fn child(&self, title: &str) -> Option<DirId> {
        self.children.get(title).copied()
    }

    /// Look up a file directly inside this directory by title.
    pub fn file(&self, title: &str) -> Option<FileId> {
        self.files.get(title).copied()
    }

    /// Child directories in discovery order.
    pub fn children(&self) -> impl Iterator<Item = (&str, DirId)> + '_ {
        self.children.iter().map(|(title, id)| (title.as_str(), *id))
    }

    /// Files directly inside this directory, in discovery order.
    pub fn files(&self) -> impl Iterator<Item = (&str, FileId)> + '_ {
        self.files.iter().map(|(title, id)| (title.as_str(), *id))
    }

    /// Get the number of child directories.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Get the number of files directly inside.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub(crate) fn set_excluded(&mut self, excluded: bool) {
        self.excluded = excluded;
    }

    pub(crate) fn insert_child(&mut self, title: CompactString, id: DirId) {
        self.children.insert(title, id);
    }

    pub(crate) fn insert_file(&mut self, title: CompactString, id: FileId) {
        self.files.insert(title, id);
    }
}

/// A file (catalog item) inside a directory.
#[derive(Debug, Clone)]
pub struct FileNode {
    title: CompactString,
    parent: DirId,
}

impl FileNode {
    pub(crate) fn new(title: impl Into<CompactString>, parent: DirId) -> Self {
        Self {
            title: title.into(),
            parent,
        }
    }

    /// File name within its parent directory.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Owning directory.
    pub fn parent(&self) -> DirId {
        self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_node_creation() {
        let node = DirNode::new("photos", Some(DirId::ROOT));
        assert_eq!(node.title(), "photos");
        assert_eq!(node.parent(), Some(DirId::ROOT));
        assert!(!node.is_excluded());
        assert!(!node.is_root());
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut node = DirNode::new("", None);
        node.insert_child("b".into(), DirId::new(1));
        node.insert_child("a".into(), DirId::new(2));

        let titles: Vec<&str> = node.children().map(|(t, _)| t).collect();
        assert_eq!(titles, vec!["b", "a"]);
        assert_eq!(node.child("a"), Some(DirId::new(2)));
        assert!(node.child("c").is_none());
    }
}
