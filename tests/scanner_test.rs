use std::path::{Path, PathBuf};
use tempfile::TempDir;

use hfrdup::common::errors::DedupError;
use hfrdup::common::format;
use hfrdup::scanner::{self, ScanFilter, ScanOptions};

fn sorted() -> ScanOptions {
    ScanOptions {
        sort_by_name: true,
        ..Default::default()
    }
}

fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().display().to_string())
        .collect()
}

fn build_tree(dir: &Path) {
    std::fs::create_dir_all(dir.join("sub/deeper")).unwrap();
    std::fs::write(dir.join("b.txt"), "bravo").unwrap();
    std::fs::write(dir.join("a.jpg"), "alpha").unwrap();
    std::fs::write(dir.join("sub/c.txt"), "charlie").unwrap();
    std::fs::write(dir.join("sub/deeper/d.jpeg"), "delta").unwrap();
    std::fs::write(dir.join("z.txt"), "zulu").unwrap();
}

// ─── Walk order ───────────────────────────────────────────────────────────────

#[test]
fn test_scan_yields_every_regular_file() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());

    let filter = ScanFilter::default();
    let files: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &sorted()).collect();

    assert_eq!(
        names(dir.path(), &files),
        vec!["a.jpg", "b.txt", "z.txt", "sub/c.txt", "sub/deeper/d.jpeg"],
        "Files of a directory come before its subdirectories"
    );
}

#[test]
fn test_scan_order_is_stable() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());

    let filter = ScanFilter::default();
    let options = ScanOptions::default();
    let first: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &options).collect();
    let second: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &options).collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

// ─── Filters ──────────────────────────────────────────────────────────────────

#[test]
fn test_name_pattern_filter() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());

    let filter = ScanFilter::new(Some(r"\.jpe?g$"), None, None).unwrap();
    let files: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &sorted()).collect();

    assert_eq!(names(dir.path(), &files), vec!["a.jpg", "sub/deeper/d.jpeg"]);
}

#[test]
fn test_min_size_skips_small_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("small.bin"), vec![1u8; 500]).unwrap();
    std::fs::write(dir.path().join("large.bin"), vec![1u8; 1500]).unwrap();

    let filter = ScanFilter::new(None, Some(1000), None).unwrap();
    let files: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &sorted()).collect();

    assert_eq!(names(dir.path(), &files), vec!["large.bin"]);
}

#[test]
fn test_size_bounds_are_inclusive() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.bin"), vec![0u8; 99]).unwrap();
    std::fs::write(dir.path().join("b.bin"), vec![0u8; 100]).unwrap();
    std::fs::write(dir.path().join("c.bin"), vec![0u8; 200]).unwrap();
    std::fs::write(dir.path().join("d.bin"), vec![0u8; 201]).unwrap();

    let filter = ScanFilter::new(None, Some(100), Some(200)).unwrap();
    let files: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &sorted()).collect();

    assert_eq!(names(dir.path(), &files), vec!["b.bin", "c.bin"]);
}

#[test]
fn test_excluded_directories_are_pruned() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());

    let options = ScanOptions {
        sort_by_name: true,
        exclude: vec!["deeper".to_string()],
        ..Default::default()
    };
    let filter = ScanFilter::default();
    let files: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &options).collect();

    assert_eq!(files.len(), 4);
    assert!(files.iter().all(|p| !p.to_string_lossy().contains("deeper")));
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed_by_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("real.txt"), "data").unwrap();
    std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt")).unwrap();

    let filter = ScanFilter::default();
    let files: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &sorted()).collect();

    assert_eq!(names(dir.path(), &files), vec!["real.txt"]);
}

// ─── Roots ────────────────────────────────────────────────────────────────────

#[test]
fn test_ensure_dir() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();

    assert!(scanner::ensure_dir(dir.path()).is_ok());
    assert!(matches!(scanner::ensure_dir(&file), Err(DedupError::Io { .. })));
    assert!(matches!(
        scanner::ensure_dir(&dir.path().join("missing")),
        Err(DedupError::Io { .. })
    ));
}

#[test]
fn test_collect_files_matches_scan() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());

    let filter = ScanFilter::default();
    let collected = scanner::collect_files(dir.path(), &filter, &sorted(), false);
    let scanned: Vec<PathBuf> = scanner::scan(dir.path(), &filter, &sorted()).collect();
    assert_eq!(collected, scanned);
}

// ─── Format tests ─────────────────────────────────────────────────────────────

#[test]
fn test_format_size_boundaries() {
    assert_eq!(format::format_size(0), "0 B");
    assert_eq!(format::format_size(1023), "1023 B");
    assert_eq!(format::format_size(1024), "1.0 KB");
    assert_eq!(format::format_size(1024 * 1024), "1.00 MB");
    let result = format::format_size(u64::MAX);
    assert!(result.contains("TB"));
}

#[test]
fn test_format_path_without_home() {
    let path = Path::new("/tmp/test.txt");
    let formatted = format::format_path(path);
    assert_eq!(formatted, "/tmp/test.txt");
}
