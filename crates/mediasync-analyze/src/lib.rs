//! Reconciliation algorithms for mediasync.
//!
//! This crate compares the two trees built by `mediasync-scan`:
//!
//! - **Diff** - Classify what changed on disk relative to the catalog,
//!   collapsing same-named removals and additions into moves
//! - **Stale entries** - Find catalog records living under excluded directories
//!
//! # Diff
//!
//! ```rust,ignore
//! use mediasync_analyze::DiffEngine;
//! use mediasync_scan::{ExtensionFilter, FsTreeBuilder, RecordSnapshot, RecordTreeBuilder, ScanConfig};
//!
//! let fs_tree = FsTreeBuilder::new()
//!     .build(&ScanConfig::new("/srv/media"), &ExtensionFilter::media())
//!     .unwrap();
//! let records: RecordSnapshot = load_records();
//! let db_tree = RecordTreeBuilder::new().build(&records, &records).unwrap();
//!
//! let diff = DiffEngine::new().compare(&fs_tree, &db_tree);
//! for change in &diff.moved_files {
//!     println!("{} -> {}", change.path1, change.path2.as_deref().unwrap_or_default());
//! }
//! ```
//!
//! # Stale Entries
//!
//! ```rust,ignore
//! use mediasync_analyze::StaleFinder;
//!
//! let stale = StaleFinder::new().find_stales(&db_tree);
//! println!("{} stale directories, {} stale files", stale.directories.len(), stale.files.len());
//! ```

mod diff;
mod stale;

pub use diff::DiffEngine;
pub use stale::StaleFinder;

// Re-export core types
pub use mediasync_core::{Change, ChangeType, Diff, DiffConfig, EntryKind, Stale, Tree};
