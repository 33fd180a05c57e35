use tempfile::TempDir;

use hfrdup::common::errors::DedupError;
use hfrdup::duplicates::hasher::{self, CHUNK_SIZE};

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

#[test]
fn test_fingerprint_identical_files() {
    let dir = TempDir::new().unwrap();
    let content = b"Hello, hfrdup! This is test content for hashing.";

    let file1 = dir.path().join("file1.txt");
    let file2 = dir.path().join("file2.txt");
    std::fs::write(&file1, content).unwrap();
    std::fs::write(&file2, content).unwrap();

    let hash1 = hasher::compute_fingerprint(&file1).unwrap();
    let hash2 = hasher::compute_fingerprint(&file2).unwrap();

    assert_eq!(hash1, hash2, "Identical files should produce identical fingerprints");
}

#[test]
fn test_fingerprint_different_files() {
    let dir = TempDir::new().unwrap();

    let file1 = dir.path().join("file1.txt");
    let file2 = dir.path().join("file2.txt");
    std::fs::write(&file1, b"Content A").unwrap();
    std::fs::write(&file2, b"Content B").unwrap();

    let hash1 = hasher::compute_fingerprint(&file1).unwrap();
    let hash2 = hasher::compute_fingerprint(&file2).unwrap();

    assert_ne!(hash1, hash2, "Different files should produce different fingerprints");
}

#[test]
fn test_fingerprint_is_sha256_hex() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("hello.txt");
    std::fs::write(&file, b"hello").unwrap();

    assert_eq!(hasher::compute_fingerprint(&file).unwrap(), HELLO_SHA256);
}

#[test]
fn test_empty_file_fingerprint() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("empty.txt");
    std::fs::write(&file, b"").unwrap();

    assert_eq!(hasher::compute_fingerprint(&file).unwrap(), EMPTY_SHA256);
}

#[test]
fn test_difference_past_first_chunk_is_detected() {
    let dir = TempDir::new().unwrap();

    // Same first chunk, different after
    let mut content1 = vec![0u8; CHUNK_SIZE * 3 + 17];
    let mut content2 = content1.clone();
    content1[CHUNK_SIZE * 2 + 5] = 0xFF;
    content2[CHUNK_SIZE * 2 + 5] = 0x01;

    let file1 = dir.path().join("file1.bin");
    let file2 = dir.path().join("file2.bin");
    let file3 = dir.path().join("file3.bin");
    std::fs::write(&file1, &content1).unwrap();
    std::fs::write(&file2, &content2).unwrap();
    std::fs::write(&file3, &content1).unwrap();

    let h1 = hasher::compute_fingerprint(&file1).unwrap();
    let h2 = hasher::compute_fingerprint(&file2).unwrap();
    let h3 = hasher::compute_fingerprint(&file3).unwrap();
    assert_ne!(h1, h2);
    assert_eq!(h1, h3);
}

#[test]
fn test_hash_nonexistent_file() {
    let result = hasher::compute_fingerprint(std::path::Path::new("/nonexistent/file.txt"));
    assert!(matches!(result, Err(DedupError::Hash { .. })));
}

#[test]
fn test_fingerprint_all_keeps_order() {
    let dir = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for i in 0..20 {
        let p = dir.path().join(format!("f{:02}.txt", i));
        std::fs::write(&p, format!("content {}", i % 4)).unwrap();
        paths.push(p);
    }
    paths.insert(7, dir.path().join("missing.txt"));

    for threads in [0, 1, 3] {
        let results = hasher::fingerprint_all(paths.clone(), threads, None);
        let out_paths: Vec<_> = results.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(out_paths, paths, "Order must be preserved with {} threads", threads);
        assert!(results[7].1.is_err(), "Missing file should fail in place");
        assert_eq!(
            results.iter().filter(|(_, r)| r.is_ok()).count(),
            20,
            "Every readable file should hash"
        );
        assert_eq!(
            results[0].1.as_ref().unwrap(),
            results[4].1.as_ref().unwrap(),
            "Files with equal content should match"
        );
    }
}
