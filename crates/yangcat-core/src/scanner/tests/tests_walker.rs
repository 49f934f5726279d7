//! Tests for the directory walker

#![allow(clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::scanner::{compute_file_hash, CapabilityFormat, DiscoveredFile, Scanner};

#[test]
fn test_capability_files_sorted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let xr = temp_dir.path().join("cisco/xr/651");
    let nx = temp_dir.path().join("cisco/nx/9.2-1");
    fs::create_dir_all(&xr).expect("Failed to create dirs");
    fs::create_dir_all(&nx).expect("Failed to create dirs");

    fs::write(xr.join("capabilities-ncs5k.xml"), "<hello/>").expect("Failed to write file");
    fs::write(xr.join("capabilities-asr9k.xml"), "<hello/>").expect("Failed to write file");
    fs::write(xr.join("platform-metadata.json"), "{}").expect("Failed to write file");
    fs::write(nx.join("ietf-yang-library.xml"), "<data/>").expect("Failed to write file");
    fs::write(nx.join("README.md"), "# nx").expect("Failed to write file");

    let files: Vec<DiscoveredFile> = Scanner::new(temp_dir.path()).capability_files().collect();

    let names: Vec<_> = files
        .iter()
        .map(|f| f.path.file_name().expect("file name").to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "ietf-yang-library.xml",
            "capabilities-asr9k.xml",
            "capabilities-ncs5k.xml"
        ]
    );
    assert_eq!(files[0].format, CapabilityFormat::YangLibrary);
    assert_eq!(files[1].format, CapabilityFormat::Hello);
}

#[test]
fn test_schema_files_skip_duplicates() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().join("standard/ietf/RFC");
    fs::create_dir_all(&dir).expect("Failed to create dirs");

    fs::write(dir.join("ietf-interfaces@2018-02-20.yang"), "").expect("Failed to write file");
    fs::write(dir.join("ietf-interfaces@2018-02-20[1].yang"), "").expect("Failed to write file");
    fs::write(dir.join("ietf-ip.yang"), "").expect("Failed to write file");
    fs::write(dir.join("notes.txt"), "").expect("Failed to write file");

    let files: Vec<PathBuf> = Scanner::new(temp_dir.path()).schema_files().collect();

    assert_eq!(
        files,
        vec![
            dir.join("ietf-interfaces@2018-02-20.yang"),
            dir.join("ietf-ip.yang")
        ]
    );
}

#[test]
fn test_scan_missing_root() {
    let scanner = Scanner::new("/nonexistent/path/to/vendor");
    assert_eq!(scanner.capability_files().count(), 0);
    assert_eq!(scanner.schema_files().count(), 0);
}

#[test]
fn test_compute_hash_empty_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("empty.yang");
    fs::write(&path, b"").expect("Failed to write file");

    // echo -n '' | sha256sum
    assert_eq!(
        compute_file_hash(&path).expect("Failed to compute hash"),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_compute_hash_larger_than_buffer() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = temp_dir.path().join("a.yang");
    let second = temp_dir.path().join("b.yang");
    let mut content = vec![b'A'; 64 * 1024];
    fs::write(&first, &content).expect("Failed to write file");
    content[40_000] = b'B';
    fs::write(&second, &content).expect("Failed to write file");

    let hash = compute_file_hash(&first).expect("Failed to compute hash");
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(hash, compute_file_hash(&second).expect("Failed to compute hash"));
}

#[test]
fn test_compute_hash_missing_file() {
    assert!(compute_file_hash(Path::new("/nonexistent/capabilities.xml")).is_err());
}
