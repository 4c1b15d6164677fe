//! Scanner and runner tests over real directory trees.

mod common;

use common::{context, touch, FakeCatalog, Write};
use curator::context::{Task, WriteMode};
use curator::runner;
use curator::scanner::{ScanMode, ScanWindow, TreeScanner};
use curator_common::{Gallery, Movie};
use std::fs::File;
use std::time::{Duration, SystemTime};

fn age(path: &std::path::Path, days: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(days * 24 * 60 * 60))
        .unwrap();
}

#[test]
fn movie_with_cover_and_gallery_is_discovered() {
    let root = tempfile::tempdir().unwrap();
    touch(root.path(), "MovieA/scene1.mp4");
    let cover = touch(root.path(), "MovieA/cover.jpg");
    touch(root.path(), "MovieA/Gallery1/pic1.png");

    let found = TreeScanner::new(vec![root.path().to_path_buf()]).discover();

    assert_eq!(
        found.movies,
        vec![Movie {
            name: "MovieA".into(),
            cover: Some(cover),
        }]
    );
    assert_eq!(found.galleries, vec![Gallery::new("MovieA")]);
}

#[test]
fn directory_without_video_is_not_a_movie() {
    let root = tempfile::tempdir().unwrap();
    touch(root.path(), "Notes/readme.txt");
    touch(root.path(), "Notes/cover.jpg");

    let found = TreeScanner::new(vec![root.path().to_path_buf()]).discover();
    assert!(found.movies.is_empty());
    assert!(found.galleries.is_empty());
}

#[test]
fn movie_without_images_has_no_gallery() {
    let root = tempfile::tempdir().unwrap();
    touch(root.path(), "Clip/clip.MKV");

    let found = TreeScanner::new(vec![root.path().to_path_buf()]).discover();
    assert_eq!(found.movies, vec![Movie::new("Clip")]);
    assert!(found.galleries.is_empty());
}

#[test]
fn missing_root_is_skipped() {
    let root = tempfile::tempdir().unwrap();
    touch(root.path(), "MovieA/a.mp4");

    let scanner = TreeScanner::new(vec![
        root.path().join("does-not-exist"),
        root.path().to_path_buf(),
    ]);
    assert_eq!(scanner.discover().movies, vec![Movie::new("MovieA")]);
}

#[test]
fn recent_scan_skips_old_covers() {
    let root = tempfile::tempdir().unwrap();
    let fresh = touch(root.path(), "New/cover.jpg");
    let stale = touch(root.path(), "Old/poster.png");
    age(&stale, 10);

    let scanner = TreeScanner::new(vec![root.path().to_path_buf()]);
    let window = ScanWindow::last_days(3);

    let mut recent = Vec::new();
    scanner.scan_covers(ScanMode::Recent, &window, |dir, file| {
        recent.push(dir.join(file));
    });
    assert_eq!(recent, vec![fresh]);

    let all = scanner.scan_covers(ScanMode::All, &window, |_, _| {});
    assert_eq!(all, 2);
}

#[test]
fn scene_pattern_ignores_thumbs_and_prefixed_names() {
    let root = tempfile::tempdir().unwrap();
    touch(root.path(), "A/thumb.jpg");
    touch(root.path(), "A/my-cover.jpg");
    touch(root.path(), "A/COVER.JPEG");

    let mut seen = Vec::new();
    TreeScanner::new(vec![root.path().to_path_buf()]).scan_covers(
        ScanMode::All,
        &ScanWindow::last_days(3),
        |_, file| seen.push(file.to_string()),
    );
    assert_eq!(seen, vec!["COVER.JPEG"]);
}

// ---------------------------------------------------------------------------
// Full runs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn movie_run_uses_catalog_library_paths() {
    let library = tempfile::tempdir().unwrap();
    let excluded = tempfile::tempdir().unwrap();
    touch(library.path(), "MovieA/scene1.mp4");
    touch(excluded.path(), "Other/x.mp4");

    let scene_path = library.path().join("MovieA/scene1.mp4");
    let catalog = FakeCatalog::new()
        .with_stash_path(library.path(), false)
        .with_stash_path(excluded.path(), true)
        .with_scene("1", &scene_path.to_string_lossy(), &[]);
    let ctx = context(
        Task::Movies {
            write: WriteMode::Apply,
        },
        vec![],
    );

    let report = runner::run(&ctx, &catalog).await.unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.linked, 1);
    let created: Vec<String> = catalog
        .writes()
        .into_iter()
        .filter_map(|w| match w {
            Write::CreateMovie { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(created, vec!["MovieA"]);
}

#[tokio::test]
async fn cover_run_applies_recent_covers_only() {
    let root = tempfile::tempdir().unwrap();
    touch(root.path(), "Fresh/cover.jpg");
    let stale = touch(root.path(), "Stale/cover.jpg");
    age(&stale, 30);

    let fresh_scene = root.path().join("Fresh/scene.mp4");
    let stale_scene = root.path().join("Stale/scene.mp4");
    let catalog = FakeCatalog::new()
        .with_scene("1", &fresh_scene.to_string_lossy(), &[])
        .with_scene("2", &stale_scene.to_string_lossy(), &[]);
    let ctx = context(
        Task::from_mode_arg(Some("set_cover_recent")),
        vec![root.path().to_path_buf()],
    );

    let report = runner::run(&ctx, &catalog).await.unwrap();

    assert_eq!(report.linked, 1);
    assert_eq!(catalog.writes(), vec![Write::SetSceneCover { scene: "1".into() }]);
}
