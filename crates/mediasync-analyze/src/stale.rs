//! Stale entry detection.
//!
//! A record is stale when it lives in or under a directory excluded from
//! tracking. Exclusion is inherited: once a directory is excluded, every
//! descendant is stale whatever its own flag says.

use tracing::debug;

use mediasync_core::{DirId, Stale, Tree};

/// Collects every record living under an excluded directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaleFinder;

impl StaleFinder {
    /// Create a new stale finder.
    pub fn new() -> Self {
        Self
    }

    /// Walk the record tree depth-first and collect stale paths.
    pub fn find_stales(&self, tree: &Tree) -> Stale {
        let mut stale = Stale::default();
        if let Some(root) = tree.root() {
            self.visit(tree, root, false, &mut stale);
        }

        debug!(
            directories = stale.directories.len(),
            files = stale.files.len(),
            "Found stale entries"
        );

        stale
    }

    fn visit(&self, tree: &Tree, id: DirId, inherited: bool, stale: &mut Stale) {
        let dir = tree.dir(id);
        let excluded = inherited || dir.is_excluded();

        if excluded {
            stale.directories.push(tree.record_path(id));
            stale
                .files
                .extend(dir.files().map(|(_, file)| tree.file_path(file)));
        }

        for (_, child) in dir.children() {
            self.visit(tree, child, excluded, stale);
        }
    }
}
