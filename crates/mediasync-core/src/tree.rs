//! Arena-backed directory tree shared by both builders.

use compact_str::CompactString;
use itertools::Itertools;

use crate::error::BuildWarning;
use crate::node::{DirId, DirNode, FileId, FileNode};

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Canonical record path of the root directory.
pub const ROOT_PATH: &str = "/";

/// Map a record path onto a path relative to the root.
///
/// The root sentinel and the empty string both map to the root itself.
pub fn normalize_path(path: &str) -> &str {
    if path == ROOT_PATH {
        ""
    } else {
        path.trim_matches(SEPARATOR)
    }
}

/// Final segment of a path.
pub fn basename(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// In-memory directory hierarchy.
///
/// The tree owns every node; nodes refer to each other by [`DirId`] and
/// [`FileId`]. A tree is either empty (no root at all) or has its root at
/// [`DirId::ROOT`].
#[derive(Debug, Clone, Default)]
pub struct Tree {
    dirs: Vec<DirNode>,
    files: Vec<FileNode>,

    /// Non-fatal issues encountered while building.
    pub warnings: Vec<BuildWarning>,
}

impl Tree {
    /// Create a tree containing only a root directory.
    pub fn new() -> Self {
        let mut tree = Self::empty();
        tree.ensure_root();
        tree
    }

    /// Create a tree without a root.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Root directory, if the tree has one.
    pub fn root(&self) -> Option<DirId> {
        (!self.dirs.is_empty()).then_some(DirId::ROOT)
    }

    /// Return the root, creating it first if the tree is empty.
    pub fn ensure_root(&mut self) -> DirId {
        if self.dirs.is_empty() {
            self.dirs.push(DirNode::new("", None));
        }
        DirId::ROOT
    }

    /// Check if the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Get a directory node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn dir(&self, id: DirId) -> &DirNode {
        &self.dirs[id.0]
    }

    /// Get a file node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn file(&self, id: FileId) -> &FileNode {
        &self.files[id.0]
    }

    /// Total number of directories, root included.
    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    /// Total number of files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of directories marked excluded.
    pub fn excluded_count(&self) -> usize {
        self.dirs.iter().filter(|d| d.is_excluded()).count()
    }

    /// Add a child directory, returning the existing one if the title is taken.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree, including
    /// [`DirId::ROOT`] on an empty tree (see [`Tree::ensure_root`]).
    pub fn add_dir(&mut self, parent: DirId, title: &str) -> DirId {
        if let Some(existing) = self.dirs[parent.0].child(title) {
            return existing;
        }
        let id = DirId::new(self.dirs.len());
        self.dirs.push(DirNode::new(title, Some(parent)));
        self.dirs[parent.0].insert_child(CompactString::new(title), id);
        id
    }

    /// Add a file, returning the existing one if the title is taken.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_file(&mut self, parent: DirId, title: &str) -> FileId {
        if let Some(existing) = self.dirs[parent.0].file(title) {
            return existing;
        }
        let id = FileId::new(self.files.len());
        self.files.push(FileNode::new(title, parent));
        self.dirs[parent.0].insert_file(CompactString::new(title), id);
        id
    }

    /// Find or create the descendant of `from` at the relative path `rel`.
    ///
    /// Missing intermediate directories are created on the way down. An
    /// empty path returns `from` itself.
    ///
    /// # Panics
    ///
    /// Panics if a directory must be created under a `from` that does not
    /// belong to this tree, such as [`DirId::ROOT`] on an empty tree.
    pub fn find_or_create(&mut self, from: DirId, rel: &str) -> DirId {
        let rel = rel.trim_start_matches(SEPARATOR);
        if rel.is_empty() {
            return from;
        }
        let (head, rest) = rel.split_once(SEPARATOR).unwrap_or((rel, ""));
        let child = self.add_dir(from, head);
        self.find_or_create(child, rest)
    }

    /// Find the descendant of `from` at the relative path `rel`.
    pub fn find(&self, from: DirId, rel: &str) -> Option<DirId> {
        rel.split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .try_fold(from, |dir, segment| self.dir(dir).child(segment))
    }

    /// Mark a directory as excluded (or not).
    pub fn set_excluded(&mut self, id: DirId, excluded: bool) {
        self.dirs[id.0].set_excluded(excluded);
    }

    /// Path of a directory relative to the root; empty for the root.
    pub fn dir_path(&self, id: DirId) -> String {
        let mut titles = Vec::new();
        let mut current = Some(id);
        while let Some(dir) = current {
            let node = self.dir(dir);
            if node.is_root() {
                break;
            }
            titles.push(node.title());
            current = node.parent();
        }
        titles.iter().rev().join(&SEPARATOR.to_string())
    }

    /// Path of a directory as stored in the record store.
    ///
    /// Same as [`Tree::dir_path`] except the root maps to [`ROOT_PATH`].
    pub fn record_path(&self, id: DirId) -> String {
        let path = self.dir_path(id);
        if path.is_empty() {
            ROOT_PATH.to_string()
        } else {
            path
        }
    }

    /// Path of a file relative to the root.
    pub fn file_path(&self, id: FileId) -> String {
        let file = self.file(id);
        let parent = self.dir_path(file.parent());
        if parent.is_empty() {
            file.title().to_string()
        } else {
            format!("{parent}{SEPARATOR}{}", file.title())
        }
    }

    /// Check whether `path` lies in or under an excluded directory.
    ///
    /// Walks from the root along the path for as far as it exists in this
    /// tree; any excluded directory on the way counts.
    pub fn lies_under_excluded(&self, path: &str) -> bool {
        let Some(mut current) = self.root() else {
            return false;
        };
        if self.dir(current).is_excluded() {
            return true;
        }
        for segment in normalize_path(path).split(SEPARATOR).filter(|s| !s.is_empty()) {
            match self.dir(current).child(segment) {
                Some(child) if self.dir(child).is_excluded() => return true,
                Some(child) => current = child,
                None => return false,
            }
        }
        false
    }

    /// Iterate over every directory in depth-first pre-order from `from`.
    pub fn walk_dirs(&self, from: DirId) -> impl Iterator<Item = DirId> + '_ {
        let mut stack = vec![from];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let children: Vec<DirId> = self.dir(id).children().map(|(_, c)| c).collect();
            stack.extend(children.into_iter().rev());
            Some(id)
        })
    }
}
