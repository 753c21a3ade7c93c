//! Change sets produced by reconciliation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Whether a change concerns a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// Classification of a detected change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    DirectoryAdded,
    DirectoryRemoved,
    DirectoryMoved,
    FileAdded,
    FileRemoved,
    FileMoved,
}

impl ChangeType {
    /// The entry kind this change applies to.
    pub fn entry_kind(&self) -> EntryKind {
        match self {
            Self::DirectoryAdded | Self::DirectoryRemoved | Self::DirectoryMoved => {
                EntryKind::Directory
            }
            Self::FileAdded | Self::FileRemoved | Self::FileMoved => EntryKind::File,
        }
    }

    /// Check if this is a move.
    pub fn is_move(&self) -> bool {
        matches!(self, Self::DirectoryMoved | Self::FileMoved)
    }

    fn added(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => Self::DirectoryAdded,
            EntryKind::File => Self::FileAdded,
        }
    }

    fn removed(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => Self::DirectoryRemoved,
            EntryKind::File => Self::FileRemoved,
        }
    }

    fn moved(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => Self::DirectoryMoved,
            EntryKind::File => Self::FileMoved,
        }
    }
}

/// A single classified change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Kind of change.
    pub change_type: ChangeType,
    /// Source path for moves, the only path otherwise.
    pub path1: String,
    /// Destination path, set only for moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path2: Option<String>,
}

impl Change {
    /// Create an "added" change.
    pub fn added(kind: EntryKind, path: impl Into<String>) -> Self {
        Self {
            change_type: ChangeType::added(kind),
            path1: path.into(),
            path2: None,
        }
    }

    /// Create a "removed" change.
    pub fn removed(kind: EntryKind, path: impl Into<String>) -> Self {
        Self {
            change_type: ChangeType::removed(kind),
            path1: path.into(),
            path2: None,
        }
    }

    /// Create a "moved" change from `from` to `to`.
    pub fn moved(kind: EntryKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            change_type: ChangeType::moved(kind),
            path1: from.into(),
            path2: Some(to.into()),
        }
    }
}

/// Result of comparing a filesystem tree with a record tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    pub added_directories: Vec<Change>,
    pub removed_directories: Vec<Change>,
    pub moved_directories: Vec<Change>,
    pub added_files: Vec<Change>,
    pub removed_files: Vec<Change>,
    pub moved_files: Vec<Change>,
}

impl Diff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket holding changes of the given type.
    pub fn changes(&self, change_type: ChangeType) -> &[Change] {
        match change_type {
            ChangeType::DirectoryAdded => &self.added_directories,
            ChangeType::DirectoryRemoved => &self.removed_directories,
            ChangeType::DirectoryMoved => &self.moved_directories,
            ChangeType::FileAdded => &self.added_files,
            ChangeType::FileRemoved => &self.removed_files,
            ChangeType::FileMoved => &self.moved_files,
        }
    }

    /// Append a change to its bucket.
    pub fn push(&mut self, change: Change) {
        let bucket = match change.change_type {
            ChangeType::DirectoryAdded => &mut self.added_directories,
            ChangeType::DirectoryRemoved => &mut self.removed_directories,
            ChangeType::DirectoryMoved => &mut self.moved_directories,
            ChangeType::FileAdded => &mut self.added_files,
            ChangeType::FileRemoved => &mut self.removed_files,
            ChangeType::FileMoved => &mut self.moved_files,
        };
        bucket.push(change);
    }

    /// Total number of changes across all buckets.
    pub fn total(&self) -> usize {
        self.buckets().map(<[Change]>::len).sum()
    }

    /// Check if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate over every change, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.buckets().flatten()
    }

    /// Sort every bucket by `(path1, path2)`.
    pub fn sort(&mut self) {
        for bucket in [
            &mut self.added_directories,
            &mut self.removed_directories,
            &mut self.moved_directories,
            &mut self.added_files,
            &mut self.removed_files,
            &mut self.moved_files,
        ] {
            bucket.sort_by(|a, b| (&a.path1, &a.path2).cmp(&(&b.path1, &b.path2)));
        }
    }

    fn buckets(&self) -> impl Iterator<Item = &[Change]> {
        [
            self.added_directories.as_slice(),
            self.removed_directories.as_slice(),
            self.moved_directories.as_slice(),
            self.added_files.as_slice(),
            self.removed_files.as_slice(),
            self.moved_files.as_slice(),
        ]
        .into_iter()
    }
}

/// Entries living under excluded directories of the record tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stale {
    /// Directory record paths, the excluded directory itself included.
    pub directories: Vec<String>,
    /// File paths.
    pub files: Vec<String>,
}

impl Stale {
    /// Check if nothing is stale.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    /// Total number of stale entries.
    pub fn total(&self) -> usize {
        self.directories.len() + self.files.len()
    }
}
