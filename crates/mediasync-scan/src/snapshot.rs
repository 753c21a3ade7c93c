//! Serializable snapshot of catalog records.

use serde::{Deserialize, Serialize};

use mediasync_core::{
    DirectoryItemProvider, DirectoryRecord, DirectoryRecordProvider, ItemRecord, ProviderError,
    Tree,
};

/// One directory record together with its item titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDirectory {
    /// Record path.
    pub path: String,
    /// Excluded from tracking.
    #[serde(default)]
    pub excluded: bool,
    /// Titles of the items stored directly inside.
    #[serde(default)]
    pub items: Vec<String>,
}

/// In-memory record store serving both provider capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub directories: Vec<SnapshotDirectory>,
}

impl RecordSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory record without items.
    pub fn with_directory(self, path: impl Into<String>, excluded: bool) -> Self {
        self.with_items(path, excluded, &[] as &[&str])
    }

    /// Add a directory record with item titles.
    pub fn with_items<S>(mut self, path: impl Into<String>, excluded: bool, items: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        self.directories.push(SnapshotDirectory {
            path: path.into(),
            excluded,
            items: items.iter().map(|s| s.as_ref().to_string()).collect(),
        });
        self
    }

    /// Export every directory of a tree as a record.
    pub fn from_tree(tree: &Tree) -> Self {
        let Some(root) = tree.root() else {
            return Self::new();
        };
        let directories = tree
            .walk_dirs(root)
            .map(|id| {
                let dir = tree.dir(id);
                SnapshotDirectory {
                    path: tree.record_path(id),
                    excluded: dir.is_excluded(),
                    items: dir.files().map(|(title, _)| title.to_string()).collect(),
                }
            })
            .collect();
        Self { directories }
    }

    /// Number of directory records.
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    /// Check if there are no records.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

impl DirectoryRecordProvider for RecordSnapshot {
    fn directories(&self) -> Result<Vec<DirectoryRecord>, ProviderError> {
        Ok(self
            .directories
            .iter()
            .map(|d| DirectoryRecord::new(d.path.clone(), d.excluded))
            .collect())
    }
}

impl DirectoryItemProvider for RecordSnapshot {
    fn items(&self, path: &str) -> Result<Vec<ItemRecord>, ProviderError> {
        Ok(self
            .directories
            .iter()
            .filter(|d| d.path == path)
            .flat_map(|d| d.items.iter().map(ItemRecord::new))
            .collect())
    }
}
