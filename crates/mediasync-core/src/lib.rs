//! Core types and traits for mediasync.
//!
//! This crate provides the data structures shared by the tree builders and
//! the reconciliation engines: the arena-backed directory tree, change sets,
//! provider capabilities, errors and configuration.

mod change;
mod config;
mod error;
mod node;
mod provider;
mod tree;

pub use change::{Change, ChangeType, Diff, EntryKind, Stale};
pub use config::{DiffConfig, DiffConfigBuilder, ScanConfig, ScanConfigBuilder};
pub use error::{BuildError, BuildWarning, WarningKind};
pub use node::{DirId, DirNode, FileId, FileNode};
pub use provider::{
    DirectoryItemProvider, DirectoryRecord, DirectoryRecordProvider, FileFilter, ItemRecord,
    ProviderError,
};
pub use tree::{ROOT_PATH, SEPARATOR, Tree, basename, normalize_path};
