//! Capabilities supplied by the record store and the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error returned by record providers.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// A known directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Record path relative to the library root, or [`ROOT_PATH`](crate::ROOT_PATH).
    pub path: String,
    /// Whether the directory is excluded from tracking.
    #[serde(default)]
    pub excluded: bool,
}

impl DirectoryRecord {
    /// Create a new directory record.
    pub fn new(path: impl Into<String>, excluded: bool) -> Self {
        Self {
            path: path.into(),
            excluded,
        }
    }
}

/// A catalog item stored directly inside a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// File name of the item.
    pub title: String,
}

impl ItemRecord {
    /// Create a new item record.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Source of every known directory record, fetched in one batch.
pub trait DirectoryRecordProvider {
    /// Return all directory records.
    fn directories(&self) -> Result<Vec<DirectoryRecord>, ProviderError>;
}

/// Source of the items directly inside a recorded directory.
pub trait DirectoryItemProvider {
    /// Return the items stored under exactly `path`.
    fn items(&self, path: &str) -> Result<Vec<ItemRecord>, ProviderError>;
}

/// Decides whether a file on disk is represented in the tree.
pub trait FileFilter {
    /// Check an absolute file path.
    fn accept(&self, path: &Path) -> bool;
}

impl<F> FileFilter for F
where
    F: Fn(&Path) -> bool,
{
    fn accept(&self, path: &Path) -> bool {
        self(path)
    }
}
