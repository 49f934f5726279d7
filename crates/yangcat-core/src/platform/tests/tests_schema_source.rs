//! Tests for SchemaSource

#![allow(clippy::expect_used)]

use std::path::Path;

use tempfile::TempDir;

use crate::capability::ModuleListFile;
use crate::platform::{RepoError, SchemaSource};

fn entry(path: &str, branch: Option<&str>) -> ModuleListFile {
    ModuleListFile {
        kind: None,
        owner: "YangModels".to_string(),
        repository: "yang.git".to_string(),
        path: path.to_string(),
        branch: branch.map(str::to_string),
    }
}

#[test]
fn test_from_module_list_file_strips_relative_path() {
    let source = SchemaSource::from_module_list_file(
        &entry("vendor/cisco/nx/9.2-1/capabilities.xml", None),
        Path::new("/srv/yang/vendor/cisco/nx/9.2-1/capabilities.xml"),
    )
    .expect("Expected a source");

    assert_eq!(source.local_root, Path::new("/srv/yang"));
    assert_eq!(source.repository, "yang");
    assert_eq!(source.revision, "master");
}

#[test]
fn test_from_module_list_file_mismatch() {
    let source = SchemaSource::from_module_list_file(
        &entry("vendor/cisco/nx/9.2-1/capabilities.xml", Some("main")),
        Path::new("/srv/yang/vendor/cisco/xe/capabilities.xml"),
    );
    assert!(source.is_none());
}

#[test]
fn test_url_for_file_outside_root() {
    let source = SchemaSource::new("o", "r", "main", "/srv/yang");
    assert_eq!(source.url_for(Path::new("/tmp/a.yang")), None);
    assert_eq!(source.url_for(Path::new("/srv/yang")), None);
}

#[test]
fn test_with_raw_host_trims_trailing_slash() {
    let source = SchemaSource::new("o", "r", "main", "/srv/yang")
        .with_raw_host("https://git.example.com/raw/")
        .with_revision("0123abcd");

    assert_eq!(
        source.url_for(Path::new("/srv/yang/a/b.yang")).as_deref(),
        Some("https://git.example.com/raw/o/r/0123abcd/a/b.yang")
    );
}

#[test]
fn test_from_checkout_outside_repository() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = SchemaSource::from_checkout(temp_dir.path());
    assert!(matches!(result, Err(RepoError::Git(_))));
}

#[test]
fn test_from_checkout_reads_origin_and_head() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo = git2::Repository::init(temp_dir.path()).expect("Failed to init repo");
    repo.remote("origin", "https://github.com/YangModels/yang.git")
        .expect("Failed to add remote");

    let source = SchemaSource::from_checkout(temp_dir.path()).expect("Expected a source");

    assert_eq!(source.owner, "YangModels");
    assert_eq!(source.repository, "yang");
    // unborn HEAD falls back to the default branch
    assert_eq!(source.revision, "master");
}
