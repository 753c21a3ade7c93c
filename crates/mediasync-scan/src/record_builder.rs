//! Rebuilds the catalog's view of the library from stored records.

use tracing::{debug, warn};

use mediasync_core::{
    BuildError, BuildWarning, DirectoryItemProvider, DirectoryRecordProvider, Tree,
    normalize_path,
};

/// Builds a [`Tree`] from directory records and their items.
///
/// Records may arrive in any order; ancestors that have not been seen yet
/// are created on demand. With zero records the result is an empty tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordTreeBuilder;

impl RecordTreeBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the record tree.
    ///
    /// A failing directory provider aborts the build. A failing item provider
    /// only leaves that directory without files and adds a warning.
    pub fn build<D, I>(&self, directories: &D, items: &I) -> Result<Tree, BuildError>
    where
        D: DirectoryRecordProvider + ?Sized,
        I: DirectoryItemProvider + ?Sized,
    {
        let records = directories.directories().map_err(BuildError::provider)?;
        let mut tree = Tree::empty();

        for record in &records {
            let root = tree.ensure_root();
            let dir = tree.find_or_create(root, normalize_path(&record.path));
            tree.set_excluded(dir, record.excluded);

            let listed = match items.items(&record.path) {
                Ok(listed) => listed,
                Err(err) => {
                    warn!(path = %record.path, error = %err, "Item listing failed");
                    tree.warnings
                        .push(BuildWarning::item_listing(&record.path, &*err));
                    continue;
                }
            };

            for item in listed {
                if tree.dir(dir).file(&item.title).is_some() {
                    warn!(path = %record.path, title = %item.title, "Duplicate item title");
                    tree.warnings
                        .push(BuildWarning::duplicate_title(&record.path, &item.title));
                    continue;
                }
                tree.add_file(dir, &item.title);
            }
        }

        debug!(
            records = records.len(),
            dirs = tree.dir_count(),
            files = tree.file_count(),
            excluded = tree.excluded_count(),
            warnings = tree.warnings.len(),
            "Built record tree"
        );

        Ok(tree)
    }
}
