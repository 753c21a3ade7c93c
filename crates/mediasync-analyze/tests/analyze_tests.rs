use std::fs;
use std::path::Path;

use mediasync_analyze::{ChangeType, DiffConfig, DiffEngine, StaleFinder};
use mediasync_core::{DirId, ROOT_PATH, Tree};
use mediasync_scan::{
    AcceptAll, ExtensionFilter, FsTreeBuilder, RecordSnapshot, RecordTreeBuilder, ScanConfig,
};
use tempfile::TempDir;

/// Build a tree from `dir/` and `dir/file` style paths.
fn tree_of(paths: &[&str]) -> Tree {
    let mut tree = Tree::new();
    for &path in paths {
        match path.strip_suffix('/') {
            Some(dir) => {
                tree.find_or_create(DirId::ROOT, dir);
            }
            None => {
                let (parent, title) = path.rsplit_once('/').unwrap_or(("", path));
                let parent = tree.find_or_create(DirId::ROOT, parent);
                tree.add_file(parent, title);
            }
        }
    }
    tree
}

fn library() -> TempDir {
    let temp = tempfile::Builder::new().prefix("library").tempdir().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join("photos/2021")).unwrap();
    fs::create_dir_all(root.join("videos")).unwrap();
    fs::write(root.join("photos/2021/beach.jpg"), "jpg").unwrap();
    fs::write(root.join("photos/2021/notes.txt"), "text").unwrap();
    fs::write(root.join("videos/trip.mp4"), "mp4").unwrap();
    fs::write(root.join("cover.png"), "png").unwrap();

    temp
}

fn scan(root: &Path) -> Tree {
    FsTreeBuilder::new()
        .build(&ScanConfig::new(root), &ExtensionFilter::media())
        .unwrap()
}

fn records_for(tree: &Tree) -> Tree {
    let snapshot = RecordSnapshot::from_tree(tree);
    RecordTreeBuilder::new().build(&snapshot, &snapshot).unwrap()
}

#[test]
fn test_identity_has_no_changes() {
    let temp = library();
    let first = scan(temp.path());
    let second = scan(temp.path());

    assert_eq!(DiffEngine::new().compare(&first, &second).total(), 0);
    assert_eq!(DiffEngine::new().compare(&first, &records_for(&first)).total(), 0);
}

#[test]
fn test_pure_directory_addition() {
    let temp = library();
    let db = records_for(&scan(temp.path()));

    fs::create_dir(temp.path().join("videos/new")).unwrap();
    let diff = DiffEngine::new().compare(&scan(temp.path()), &db);

    assert_eq!(diff.total(), 1);
    assert_eq!(diff.added_directories.len(), 1);
    assert_eq!(diff.added_directories[0].path1, "videos/new");
    assert!(diff.added_directories[0].path2.is_none());
}

#[test]
fn test_pure_file_removal() {
    let temp = library();
    let db = records_for(&scan(temp.path()));

    fs::remove_file(temp.path().join("videos/trip.mp4")).unwrap();
    let diff = DiffEngine::new().compare(&scan(temp.path()), &db);

    assert_eq!(diff.total(), 1);
    assert_eq!(diff.removed_files.len(), 1);
    assert_eq!(diff.removed_files[0].path1, "videos/trip.mp4");
    assert_eq!(diff.removed_files[0].change_type, ChangeType::FileRemoved);
}

#[test]
fn test_file_move_collapses() {
    let temp = library();
    let db = records_for(&scan(temp.path()));

    fs::rename(
        temp.path().join("photos/2021/beach.jpg"),
        temp.path().join("videos/beach.jpg"),
    )
    .unwrap();
    let diff = DiffEngine::new().compare(&scan(temp.path()), &db);

    assert_eq!(diff.total(), 1);
    assert_eq!(diff.moved_files.len(), 1);
    assert_eq!(diff.moved_files[0].path1, "photos/2021/beach.jpg");
    assert_eq!(diff.moved_files[0].path2.as_deref(), Some("videos/beach.jpg"));
}

#[test]
fn test_directory_move_with_nested_content() {
    // a/b/c/clip.mp4 moves out to c/clip.mp4 and a/b is deleted.
    let db = records_for(&tree_of(&["a/b/c/clip.mp4"]));
    let fs_tree = tree_of(&["c/clip.mp4"]);

    let diff = DiffEngine::new().compare(&fs_tree, &db);

    assert_eq!(diff.moved_directories.len(), 1);
    assert_eq!(diff.moved_directories[0].path1, "a/b/c");
    assert_eq!(diff.moved_directories[0].path2.as_deref(), Some("c"));

    assert_eq!(diff.moved_files.len(), 1);
    assert_eq!(diff.moved_files[0].path1, "a/b/c/clip.mp4");
    assert_eq!(diff.moved_files[0].path2.as_deref(), Some("c/clip.mp4"));

    let removed: Vec<&str> = diff.removed_directories.iter().map(|c| c.path1.as_str()).collect();
    assert_eq!(removed, vec!["a", "a/b"]);

    assert!(diff.added_directories.is_empty());
    assert!(diff.added_files.is_empty());
    assert_eq!(diff.total(), 4);
}

#[test]
fn test_directory_rename_keeps_contents_in_place() {
    let db = records_for(&tree_of(&["shows/s1/e1.mkv"]));
    let fs_tree = tree_of(&["series/s1/e1.mkv"]);

    let diff = DiffEngine::new().compare(&fs_tree, &db);

    // Renamed roots do not pair by basename; the unchanged child does.
    assert_eq!(diff.removed_directories[0].path1, "shows");
    assert_eq!(diff.added_directories[0].path1, "series");
    assert_eq!(diff.moved_directories[0].path1, "shows/s1");
    assert_eq!(diff.moved_directories[0].path2.as_deref(), Some("series/s1"));
    assert_eq!(diff.moved_files[0].path2.as_deref(), Some("series/s1/e1.mkv"));
    assert_eq!(diff.total(), 4);
}

#[test]
fn test_exclusion_suppresses_additions() {
    let temp = library();
    let snapshot = RecordSnapshot::from_tree(&scan(temp.path()));
    let snapshot = RecordSnapshot {
        directories: snapshot
            .directories
            .into_iter()
            .map(|mut d| {
                d.excluded = d.path == "photos";
                d
            })
            .collect(),
    };
    let db = RecordTreeBuilder::new().build(&snapshot, &snapshot).unwrap();

    fs::create_dir(temp.path().join("photos/2021/raw")).unwrap();
    fs::write(temp.path().join("photos/2021/raw/dsc.jpg"), "jpg").unwrap();
    fs::write(temp.path().join("photos/sunset.jpg"), "jpg").unwrap();

    let diff = DiffEngine::new().compare(&scan(temp.path()), &db);
    assert_eq!(diff.total(), 0);

    let unfiltered = DiffConfig::builder().filter_excluded(false).build().unwrap();
    let diff = DiffEngine::with_config(unfiltered).compare(&scan(temp.path()), &db);
    assert_eq!(diff.added_directories.len(), 1);
    assert_eq!(diff.added_files.len(), 2);
}

#[test]
fn test_exclusion_does_not_hide_removals() {
    let snapshot = RecordSnapshot::new()
        .with_directory(ROOT_PATH, false)
        .with_items("private", true, &["old.jpg"]);
    let db = RecordTreeBuilder::new().build(&snapshot, &snapshot).unwrap();
    let fs_tree = tree_of(&["private/"]);

    let diff = DiffEngine::new().compare(&fs_tree, &db);
    assert_eq!(diff.removed_files.len(), 1);
    assert_eq!(diff.removed_files[0].path1, "private/old.jpg");
}

#[test]
fn test_stale_propagation() {
    let snapshot = RecordSnapshot::new()
        .with_items(ROOT_PATH, false, &["cover.png"])
        .with_items("archive", true, &["a.jpg"])
        .with_items("archive/2019", false, &["b.jpg", "c.jpg"])
        .with_items("archive/2019/deep", true, &["d.jpg"])
        .with_items("archive/2019/deep/deeper", false, &["e.jpg"])
        .with_items("current", false, &["f.jpg"]);
    let db = RecordTreeBuilder::new().build(&snapshot, &snapshot).unwrap();

    let stale = StaleFinder::new().find_stales(&db);

    assert_eq!(
        stale.directories,
        vec![
            "archive",
            "archive/2019",
            "archive/2019/deep",
            "archive/2019/deep/deeper"
        ]
    );
    assert_eq!(
        stale.files,
        vec![
            "archive/a.jpg",
            "archive/2019/b.jpg",
            "archive/2019/c.jpg",
            "archive/2019/deep/d.jpg",
            "archive/2019/deep/deeper/e.jpg"
        ]
    );
}

#[test]
fn test_stale_excluded_leaf_in_tracked_tree() {
    let snapshot = RecordSnapshot::new()
        .with_directory("music", false)
        .with_items("music/bootlegs", true, &["live.flac"])
        .with_items("music/albums", false, &["track.flac"]);
    let db = RecordTreeBuilder::new().build(&snapshot, &snapshot).unwrap();

    let stale = StaleFinder::new().find_stales(&db);
    assert_eq!(stale.directories, vec!["music/bootlegs"]);
    assert_eq!(stale.files, vec!["music/bootlegs/live.flac"]);
}

#[test]
fn test_root_absent_reports_single_addition() {
    let temp = library();
    let db = RecordTreeBuilder::new()
        .build(&RecordSnapshot::new(), &RecordSnapshot::new())
        .unwrap();
    assert!(db.root().is_none());

    let diff = DiffEngine::new().compare(&scan(temp.path()), &db);

    assert_eq!(diff.total(), 1);
    assert_eq!(diff.added_directories[0].path1, ROOT_PATH);
}

#[test]
fn test_empty_record_root_reports_everything() {
    let temp = library();
    let db = records_for(&Tree::new());

    let diff = DiffEngine::new().compare(&scan(temp.path()), &db);

    let dirs: Vec<&str> = diff.added_directories.iter().map(|c| c.path1.as_str()).collect();
    let files: Vec<&str> = diff.added_files.iter().map(|c| c.path1.as_str()).collect();
    assert_eq!(dirs, vec!["photos", "photos/2021", "videos"]);
    assert_eq!(
        files,
        vec!["cover.png", "photos/2021/beach.jpg", "videos/trip.mp4"]
    );
}

#[test]
fn test_ambiguous_basenames_pair_first_available() {
    let db = records_for(&tree_of(&["a/x.jpg", "b/x.jpg"]));
    let fs_tree = tree_of(&["a/", "b/", "c/x.jpg", "d/x.jpg"]);

    let diff = DiffEngine::new().compare(&fs_tree, &db);

    assert_eq!(diff.moved_files.len(), 2);
    assert_eq!(diff.moved_files[0].path1, "a/x.jpg");
    assert_eq!(diff.moved_files[0].path2.as_deref(), Some("c/x.jpg"));
    assert_eq!(diff.moved_files[1].path1, "b/x.jpg");
    assert_eq!(diff.moved_files[1].path2.as_deref(), Some("d/x.jpg"));
    assert!(diff.added_files.is_empty());
    assert!(diff.removed_files.is_empty());
}

#[test]
fn test_filter_controls_file_nodes() {
    let temp = library();
    let media = scan(temp.path());
    let everything = FsTreeBuilder::new()
        .build(&ScanConfig::new(temp.path()), &AcceptAll)
        .unwrap();

    let diff = DiffEngine::new().compare(&everything, &records_for(&media));
    assert_eq!(diff.total(), 1);
    assert_eq!(diff.added_files[0].path1, "photos/2021/notes.txt");
}
