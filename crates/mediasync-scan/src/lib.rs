//! Tree builders for mediasync.
//!
//! This crate builds the two views that reconciliation compares:
//!
//! - **Filesystem trees** via [`FsTreeBuilder`], walking the library root
//!   with jwalk and keeping only files accepted by a [`FileFilter`]
//! - **Record trees** via [`RecordTreeBuilder`], reassembling the catalog's
//!   directory records and items into the same shape
//!
//! # Example
//!
//! ```rust,no_run
//! use mediasync_scan::{ExtensionFilter, FsTreeBuilder, RecordSnapshot, RecordTreeBuilder, ScanConfig};
//!
//! let config = ScanConfig::new("/srv/media");
//! let fs_tree = FsTreeBuilder::new().build(&config, &ExtensionFilter::media()).unwrap();
//!
//! let records = RecordSnapshot::new().with_items("/", false, &["cover.jpg"]);
//! let db_tree = RecordTreeBuilder::new().build(&records, &records).unwrap();
//!
//! println!("{} dirs on disk, {} in the catalog", fs_tree.dir_count(), db_tree.dir_count());
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use mediasync_scan::FsTreeBuilder;
//!
//! let builder = FsTreeBuilder::new();
//! let mut progress_rx = builder.subscribe();
//!
//! std::thread::spawn(move || {
//!     while let Ok(progress) = progress_rx.blocking_recv() {
//!         println!("Seen {} entries", progress.total_entries());
//!     }
//! });
//! ```

mod filter;
mod fs_builder;
mod progress;
mod record_builder;
mod snapshot;

pub use filter::{AcceptAll, ExtensionFilter, GlobFilter, MEDIA_EXTENSIONS};
pub use fs_builder::FsTreeBuilder;
pub use progress::BuildProgress;
pub use record_builder::RecordTreeBuilder;
pub use snapshot::{RecordSnapshot, SnapshotDirectory};

// Re-export core types for convenience
pub use mediasync_core::{
    BuildError, BuildWarning, DirId, DirectoryItemProvider, DirectoryRecordProvider, FileFilter,
    ScanConfig, Tree, WarningKind,
};
