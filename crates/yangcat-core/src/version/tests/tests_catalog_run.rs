//! Tests for CatalogRun

#![allow(clippy::expect_used)]

use std::fs;

use tempfile::TempDir;

use crate::platform::SchemaSource;
use crate::version::CatalogRun;

#[test]
fn test_new_run_has_unique_id() {
    let first = CatalogRun::new("/srv/yang");
    let second = CatalogRun::new("/srv/yang");

    assert_eq!(first.source_path, "/srv/yang");
    assert_eq!(first.id.len(), 36);
    assert_ne!(first.id, second.id);
    assert!(first.commit_sha.is_none());
    assert!(first.branch.is_none());
}

#[test]
fn test_builders() {
    let run = CatalogRun::new("/srv/yang")
        .with_commit("abc123")
        .with_branch("main")
        .with_version("2024-06");

    assert_eq!(run.commit_sha.as_deref(), Some("abc123"));
    assert_eq!(run.branch.as_deref(), Some("main"));
    assert_eq!(run.version.as_deref(), Some("2024-06"));
}

#[test]
fn test_git_info_outside_repository() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let run = CatalogRun::new(temp_dir.path().display().to_string()).with_git_info();

    assert!(run.commit_sha.is_none());
    assert!(run.branch.is_none());
}

#[test]
fn test_git_info_reads_head_commit() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo = git2::Repository::init(temp_dir.path()).expect("Failed to init repo");
    fs::write(temp_dir.path().join("a.yang"), "module a {}").expect("Failed to write file");

    let mut index = repo.index().expect("Failed to open index");
    index
        .add_path(std::path::Path::new("a.yang"))
        .expect("Failed to stage file");
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let signature =
        git2::Signature::now("yangcat", "yangcat@example.com").expect("Failed to create signature");
    let commit = repo
        .commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
        .expect("Failed to commit");

    let run = CatalogRun::new(temp_dir.path().display().to_string()).with_git_info();

    assert_eq!(run.commit_sha, Some(commit.to_string()));
    assert!(run.branch.is_some());
}

#[test]
fn test_serialization() {
    let run = CatalogRun::new("/srv/yang").with_version("v1");
    let json = serde_json::to_string(&run).expect("Failed to serialize");
    let back: CatalogRun = serde_json::from_str(&json).expect("Failed to deserialize");
    assert_eq!(back, run);
}

#[test]
fn test_finish_records_counts() {
    let run = CatalogRun::new("/srv/vendor");
    assert!(!run.is_finished());

    let run = run.finish(3, 120);

    assert!(run.is_finished());
    assert_eq!(run.device_count, 3);
    assert_eq!(run.record_count, 120);
    assert!(run.finished_at >= Some(run.started_at));
}

#[test]
fn test_schema_source_fills_missing_commit() {
    let source = SchemaSource::new("YangModels", "yang", "0123abcd", "/srv/yang");

    let run = CatalogRun::new("/srv/yang/vendor").with_schema_source(&source);
    assert_eq!(run.schema_repository.as_deref(), Some("YangModels/yang"));
    assert_eq!(run.commit_sha.as_deref(), Some("0123abcd"));

    let pinned = CatalogRun::new("/srv/yang/vendor")
        .with_commit("feedface")
        .with_schema_source(&source);
    assert_eq!(pinned.commit_sha.as_deref(), Some("feedface"));
}

#[test]
fn test_git_info_keeps_explicit_commit_outside_repository() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let run = CatalogRun::new(temp_dir.path().display().to_string())
        .with_commit("abc123")
        .with_git_info();

    assert_eq!(run.commit_sha.as_deref(), Some("abc123"));
}
