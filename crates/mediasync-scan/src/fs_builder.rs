//! JWalk-based filesystem tree builder.

use std::path::{Path, PathBuf};
use std::time::Duration;

use itertools::Itertools;
use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;
use tracing::debug;

use mediasync_core::{BuildError, DirId, FileFilter, SEPARATOR, ScanConfig, Tree};

use crate::progress::{BuildProgress, ProgressTracker};

/// Entries between two progress broadcasts.
const PROGRESS_INTERVAL: u64 = 1000;

/// Builds a [`Tree`] by walking a directory on disk.
///
/// Every subdirectory becomes a directory node. Other entries become file
/// nodes only when the caller's [`FileFilter`] accepts their absolute path.
/// The root node's title is empty so all paths are relative to the walk root.
pub struct FsTreeBuilder {
    progress_tx: broadcast::Sender<BuildProgress>,
}

impl FsTreeBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to build progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<BuildProgress> {
        self.progress_tx.subscribe()
    }

    /// Walk `config.root` and build its tree.
    ///
    /// Any listing failure, at the root or below, aborts the build.
    pub fn build<F>(&self, config: &ScanConfig, filter: &F) -> Result<Tree, BuildError>
    where
        F: FileFilter + ?Sized,
    {
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| BuildError::io(&config.root, e))?;

        if !root_path.is_dir() {
            return Err(BuildError::NotADirectory { path: root_path });
        }
        std::fs::read_dir(&root_path).map_err(|e| BuildError::io(&root_path, e))?;

        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        let walker = WalkDir::new(&root_path)
            .parallelism(parallelism)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .sort(true)
            .min_depth(0);

        let mut tree = Tree::new();
        let mut tracker = ProgressTracker::new();

        for entry_result in walker {
            let mut entry = entry_result.map_err(|err| walk_error(&root_path, err))?;

            // jwalk stores directory listing failures on the directory entry
            if let Some(err) = entry.read_children_error.take() {
                return Err(walk_error(&entry.path(), err));
            }
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let rel = relative_path(&root_path, &path);

            if entry.file_type().is_dir() {
                tree.find_or_create(DirId::ROOT, &rel);
                tracker.record_dir();
            } else {
                let accepted = filter.accept(&path);
                if accepted {
                    let (parent_rel, title) =
                        rel.rsplit_once(SEPARATOR).unwrap_or(("", rel.as_str()));
                    let parent = tree.find_or_create(DirId::ROOT, parent_rel);
                    tree.add_file(parent, title);
                }
                tracker.record_file(accepted);
            }

            tracker.set_current_path(path);
            if tracker.entries() % PROGRESS_INTERVAL == 0 {
                let _ = self.progress_tx.send(tracker.snapshot());
            }
        }

        let progress = tracker.snapshot();
        debug!(
            root = %root_path.display(),
            dirs = tree.dir_count(),
            files = tree.file_count(),
            rejected = progress.files_rejected(),
            rate = progress.entries_per_second(),
            elapsed_ms = progress.elapsed.as_millis() as u64,
            "Built filesystem tree"
        );
        let _ = self.progress_tx.send(progress);

        Ok(tree)
    }
}

impl Default for FsTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Join the components of `path` below `root` with the tree separator.
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .join(&SEPARATOR.to_string())
}

/// Map a jwalk error onto a build error, falling back to `fallback` for the path.
fn walk_error(fallback: &Path, err: jwalk::Error) -> BuildError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(fallback));
    match err.io_error() {
        Some(io) => BuildError::io(path, std::io::Error::new(io.kind(), io.to_string())),
        None => BuildError::Walk {
            path,
            message: err.to_string(),
        },
    }
}
