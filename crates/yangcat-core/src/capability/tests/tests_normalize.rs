//! Tests for CapabilitySource normalization

#![allow(clippy::expect_used)]

use std::fs;

use tempfile::TempDir;

use crate::capability::{
    CapabilityDocument, CapabilityEntry, CapabilitySource, PlatformMetadata,
};
use crate::catalog::model::ConformanceType;

fn hello(uris: &[&str]) -> CapabilityDocument {
    CapabilityDocument::Hello(uris.iter().map(|u| (*u).to_string()).collect())
}

#[test]
fn test_hello_only() {
    let source = CapabilitySource::from_document(hello(&[
        "urn:ietf:params:netconf:base:1.0",
        "urn:ietf:params:netconf:capability:candidate:1.0",
        "http://example.com/foo?module=foo&revision=2020-01-01",
        "http://example.com/bar?module=bar",
    ]));

    let set = source.normalize();

    let names: Vec<_> = set.entries.iter().map(|e| e.module_name.as_str()).collect();
    assert_eq!(names, vec!["foo", "bar"]);
    assert_eq!(set.capabilities, vec!["urn:ietf:params:netconf:capability:candidate:1.0"]);
    assert_eq!(set.netconf_versions, vec!["urn:ietf:params:netconf:base:1.0"]);
}

#[test]
fn test_metadata_capabilities_take_precedence() {
    let source = CapabilitySource::from_document(hello(&[
        "urn:ietf:params:netconf:base:1.0",
        "urn:ietf:params:netconf:capability:candidate:1.0",
        "http://example.com/foo?module=foo&revision=2020-01-01",
    ]))
    .with_metadata_capabilities(vec![
        "urn:ietf:params:netconf:base:1.1".to_string(),
        "urn:ietf:params:netconf:capability:rollback-on-error:1.0".to_string(),
    ]);

    let set = source.normalize();

    assert_eq!(set.netconf_versions, vec!["urn:ietf:params:netconf:base:1.1"]);
    assert_eq!(
        set.capabilities,
        vec!["urn:ietf:params:netconf:capability:rollback-on-error:1.0"]
    );
    // modules still come from the hello message
    assert_eq!(set.entries, vec![CapabilityEntry::new("foo").with_revision("2020-01-01")]);
}

#[test]
fn test_metadata_without_document() {
    let source = CapabilitySource::from_metadata(vec![
        "urn:ietf:params:netconf:base:1.1".to_string(),
        "http://example.com/foo?module=foo&revision=2020-01-01".to_string(),
    ]);

    let set = source.normalize();

    assert_eq!(set.entries.len(), 1);
    assert_eq!(set.entries[0].module_name, "foo");
    assert_eq!(set.netconf_versions, vec!["urn:ietf:params:netconf:base:1.1"]);
    assert!(set.capabilities.is_empty());
}

#[test]
fn test_yang_library_has_no_capability_lists() {
    let mut entry = CapabilityEntry::new("foo");
    entry.conformance_type = Some(ConformanceType::Import);
    let source = CapabilitySource::from_document(CapabilityDocument::YangLibrary(vec![entry]));

    let set = source.normalize();

    assert_eq!(set.entries.len(), 1);
    assert!(set.capabilities.is_empty());
    assert!(set.netconf_versions.is_empty());
}

#[test]
fn test_load_with_metadata_beside_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().join("vendor/acme/os/1.0");
    fs::create_dir_all(&dir).expect("Failed to create dirs");
    let file = dir.join("capabilities-box.xml");
    fs::write(
        &file,
        r#"<hello><capabilities>
            <capability>urn:ietf:params:netconf:base:1.0</capability>
            <capability>http://acme.example/sys?module=acme-sys&amp;revision=2021-01-01</capability>
        </capabilities></hello>"#,
    )
    .expect("Failed to write capabilities");
    fs::write(
        dir.join("platform-metadata.json"),
        r#"{"platforms": {"platform": [{
            "name": "box",
            "vendor": "acme",
            "software-version": "1.0",
            "os-type": "AcmeOS",
            "module-list-file": {
                "owner": "acme",
                "repository": "models",
                "path": "vendor/acme/os/1.0/capabilities-box.xml"
            },
            "netconf-capabilities": ["urn:ietf:params:netconf:base:1.1"]
        }]}}"#,
    )
    .expect("Failed to write metadata");

    let metadata = PlatformMetadata::beside(&file)
        .expect("Failed to read metadata")
        .expect("Expected metadata");
    let set = CapabilitySource::load(&file, Some(&metadata))
        .expect("Failed to load")
        .normalize();

    assert_eq!(set.netconf_versions, vec!["urn:ietf:params:netconf:base:1.1"]);
    assert_eq!(set.entries[0].module_name, "acme-sys");
}

#[test]
fn test_beside_without_metadata() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file = temp_dir.path().join("capabilities.xml");

    let metadata = PlatformMetadata::beside(&file).expect("Failed to check metadata");
    assert!(metadata.is_none());
}
