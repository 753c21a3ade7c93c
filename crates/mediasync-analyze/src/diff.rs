//! Structural diff between a filesystem tree and a record tree.
//!
//! Runs in three passes:
//! 1. Walk both trees together, matching children by title, and collect
//!    every unmatched directory and file as a pending addition or removal
//! 2. Pair pending removals with pending additions of the same kind and
//!    basename into moves (first available match wins)
//! 3. Drop additions that land under a directory excluded in the record tree

use std::collections::VecDeque;

use compact_str::CompactString;
use indexmap::IndexMap;
use tracing::{debug, trace};

use mediasync_core::{Change, Diff, DiffConfig, DirId, EntryKind, Tree};

/// Compares a filesystem tree against a record tree.
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    /// Create a new engine with default config.
    pub fn new() -> Self {
        Self {
            config: DiffConfig::default(),
        }
    }

    /// Create a new engine with custom config.
    pub fn with_config(config: DiffConfig) -> Self {
        Self { config }
    }

    /// Compare `fs` (what is on disk) with `db` (what the catalog holds).
    ///
    /// Either tree may be empty. When the record tree has no root at all,
    /// the filesystem root is reported as the single added directory.
    pub fn compare(&self, fs: &Tree, db: &Tree) -> Diff {
        let mut pending = Comparison::new(fs, db);

        match (fs.root(), db.root()) {
            (Some(fs_root), Some(db_root)) => {
                pending.compare_directory(Some(fs_root), Some(db_root))
            }
            (Some(fs_root), None) => pending.added_dirs.insert("", fs.record_path(fs_root)),
            (None, Some(db_root)) => pending.removed_dirs.insert("", db.record_path(db_root)),
            (None, None) => {}
        }

        let Comparison {
            added_dirs,
            removed_dirs,
            added_files,
            removed_files,
            ..
        } = pending;

        let mut diff = Diff::new();
        self.resolve(removed_dirs, added_dirs, EntryKind::Directory, &mut diff);
        self.resolve(removed_files, added_files, EntryKind::File, &mut diff);

        let suppressed = if self.config.filter_excluded {
            drop_excluded_additions(db, &mut diff)
        } else {
            0
        };

        if self.config.sort_output {
            diff.sort();
        }

        debug!(
            total = diff.total(),
            moved_dirs = diff.moved_directories.len(),
            moved_files = diff.moved_files.len(),
            suppressed,
            "Compared trees"
        );

        diff
    }

    /// Turn pending entries of one kind into changes, pairing moves.
    fn resolve(&self, removed: PathIndex, mut added: PathIndex, kind: EntryKind, diff: &mut Diff) {
        for (name, paths) in removed.entries {
            for path in paths {
                let target = if self.config.detect_moves {
                    added.take(&name)
                } else {
                    None
                };
                match target {
                    Some(to) => {
                        trace!(%kind, from = %path, to = %to, "Paired move");
                        diff.push(Change::moved(kind, path, to));
                    }
                    None => diff.push(Change::removed(kind, path)),
                }
            }
        }

        for path in added.into_paths() {
            diff.push(Change::added(kind, path));
        }
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove additions under excluded record directories, returning how many.
fn drop_excluded_additions(db: &Tree, diff: &mut Diff) -> usize {
    let before = diff.added_directories.len() + diff.added_files.len();
    diff.added_directories.retain(|c| !db.lies_under_excluded(&c.path1));
    diff.added_files.retain(|c| !db.lies_under_excluded(&c.path1));
    before - (diff.added_directories.len() + diff.added_files.len())
}

/// Pending paths keyed by basename, in discovery order.
#[derive(Debug, Default)]
struct PathIndex {
    entries: IndexMap<CompactString, VecDeque<String>>,
}

impl PathIndex {
    fn insert(&mut self, name: &str, path: String) {
        self.entries
            .entry(CompactString::new(name))
            .or_default()
            .push_back(path);
    }

    /// Consume the first pending path with this basename.
    fn take(&mut self, name: &str) -> Option<String> {
        self.entries.get_mut(name)?.pop_front()
    }

    fn into_paths(self) -> impl Iterator<Item = String> {
        self.entries.into_values().flatten()
    }
}

/// State of the structural pass.
struct Comparison<'a> {
    fs: &'a Tree,
    db: &'a Tree,
    added_dirs: PathIndex,
    removed_dirs: PathIndex,
    added_files: PathIndex,
    removed_files: PathIndex,
}

impl<'a> Comparison<'a> {
    fn new(fs: &'a Tree, db: &'a Tree) -> Self {
        Self {
            fs,
            db,
            added_dirs: PathIndex::default(),
            removed_dirs: PathIndex::default(),
            added_files: PathIndex::default(),
            removed_files: PathIndex::default(),
        }
    }

    /// Compare two directories occupying the same position; either may be absent.
    fn compare_directory(&mut self, fs_dir: Option<DirId>, db_dir: Option<DirId>) {
        match (fs_dir, db_dir) {
            (Some(fs_dir), Some(db_dir)) => self.compare_matched(fs_dir, db_dir),
            (Some(fs_dir), None) => self.add_contents(fs_dir),
            (None, Some(db_dir)) => self.remove_contents(db_dir),
            (None, None) => {}
        }
    }

    fn compare_matched(&mut self, fs_dir: DirId, db_dir: DirId) {
        let (fs, db) = (self.fs, self.db);
        let fs_node = fs.dir(fs_dir);
        let db_node = db.dir(db_dir);

        for (title, fs_child) in fs_node.children() {
            match db_node.child(title) {
                Some(db_child) => self.compare_directory(Some(fs_child), Some(db_child)),
                None => {
                    self.added_dirs.insert(title, fs.record_path(fs_child));
                    self.compare_directory(Some(fs_child), None);
                }
            }
        }

        for (title, db_child) in db_node.children() {
            if fs_node.child(title).is_none() {
                self.removed_dirs.insert(title, db.record_path(db_child));
                self.compare_directory(None, Some(db_child));
            }
        }

        for (title, fs_file) in fs_node.files() {
            if db_node.file(title).is_none() {
                self.added_files.insert(title, fs.file_path(fs_file));
            }
        }

        for (title, db_file) in db_node.files() {
            if fs_node.file(title).is_none() {
                self.removed_files.insert(title, db.file_path(db_file));
            }
        }
    }

    /// Everything inside a directory with no record counterpart is added.
    fn add_contents(&mut self, fs_dir: DirId) {
        let fs = self.fs;
        let node = fs.dir(fs_dir);

        for (title, child) in node.children() {
            self.added_dirs.insert(title, fs.record_path(child));
            self.compare_directory(Some(child), None);
        }
        for (title, file) in node.files() {
            self.added_files.insert(title, fs.file_path(file));
        }
    }

    /// Everything inside a record directory missing on disk is removed.
    fn remove_contents(&mut self, db_dir: DirId) {
        let db = self.db;
        let node = db.dir(db_dir);

        for (title, child) in node.children() {
            self.removed_dirs.insert(title, db.record_path(child));
            self.compare_directory(None, Some(child));
        }
        for (title, file) in node.files() {
            self.removed_files.insert(title, db.file_path(file));
        }
    }
}
