//! Tests for capability document detection and parsing

#![allow(clippy::expect_used)]

use std::fs;

use tempfile::TempDir;

use crate::capability::{CapabilityDocument, CapabilityError};
use crate::catalog::model::{ConformanceType, DeviationRef};

const HELLO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hello xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">
  <capabilities>
    <capability>urn:ietf:params:netconf:base:1.1</capability>
    <capability>
      http://cisco.com/ns/yang/Cisco-IOS-XR-types?module=Cisco-IOS-XR-types&revision=2019-04-05
    </capability>
    <capability>urn:ietf:params:xml:ns:yang:ietf-inet-types?module=ietf-inet-types&amp;revision=2013-07-15</capability>
  </capabilities>
</hello>
"#;

const MODULES_STATE: &str = r#"<?xml version="1.0"?>
<data xmlns="urn:ietf:params:xml:ns:netconf:base:1.0">
  <modules-state xmlns="urn:ietf:params:xml:ns:yang:ietf-yang-library">
    <module-set-id>42</module-set-id>
    <module>
      <name>ietf-interfaces</name>
      <revision>2018-02-20</revision>
      <namespace>urn:ietf:params:xml:ns:yang:ietf-interfaces</namespace>
      <feature>if-mib</feature>
      <deviation>
        <name>acme-interfaces-deviations</name>
        <revision>2020-01-01</revision>
      </deviation>
      <conformance-type>implement</conformance-type>
      <submodule>
        <name>ietf-interfaces-sub</name>
        <revision>1999-01-01</revision>
      </submodule>
    </module>
    <module>
      <name>ietf-yang-types</name>
      <revision>2013-07-15</revision>
      <conformance-type>import</conformance-type>
    </module>
  </modules-state>
</data>
"#;

const MODULE_SET: &str = r#"<yang-library xmlns="urn:ietf:params:xml:ns:yang:ietf-yang-library">
  <module-set>
    <name>complete</name>
    <module>
      <name>acme-system</name>
      <revision>2021-03-01</revision>
      <deviation>acme-system-devs</deviation>
    </module>
    <import-only-module>
      <name>ietf-inet-types</name>
      <revision>2013-07-15</revision>
    </import-only-module>
  </module-set>
</yang-library>
"#;

#[test]
fn test_hello_with_bare_ampersand() {
    let document = CapabilityDocument::from_xml(HELLO).expect("Failed to parse hello");

    let CapabilityDocument::Hello(uris) = document else {
        panic!("Expected a hello document");
    };
    assert_eq!(uris.len(), 3);
    assert_eq!(uris[0], "urn:ietf:params:netconf:base:1.1");
    assert_eq!(
        uris[1],
        "http://cisco.com/ns/yang/Cisco-IOS-XR-types?module=Cisco-IOS-XR-types&revision=2019-04-05"
    );
    assert_eq!(
        uris[2],
        "urn:ietf:params:xml:ns:yang:ietf-inet-types?module=ietf-inet-types&revision=2013-07-15"
    );
}

#[test]
fn test_modules_state_reads_direct_children_only() {
    let document = CapabilityDocument::from_xml(MODULES_STATE).expect("Failed to parse");

    let CapabilityDocument::YangLibrary(entries) = document else {
        panic!("Expected a YANG-Library document");
    };
    assert_eq!(entries.len(), 2);

    let interfaces = &entries[0];
    assert_eq!(interfaces.module_name, "ietf-interfaces");
    assert_eq!(interfaces.revision.as_deref(), Some("2018-02-20"));
    assert_eq!(interfaces.features, vec!["if-mib"]);
    assert_eq!(
        interfaces.deviations,
        vec![DeviationRef {
            name: "acme-interfaces-deviations".to_string(),
            revision: Some("2020-01-01".to_string()),
        }]
    );
    assert_eq!(interfaces.conformance_type, Some(ConformanceType::Implement));

    assert_eq!(entries[1].module_name, "ietf-yang-types");
    assert_eq!(entries[1].conformance_type, Some(ConformanceType::Import));
}

#[test]
fn test_module_set_layout() {
    let document = CapabilityDocument::from_xml(MODULE_SET).expect("Failed to parse");

    let CapabilityDocument::YangLibrary(entries) = document else {
        panic!("Expected a YANG-Library document");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].module_name, "acme-system");
    assert_eq!(entries[0].conformance_type, None);
    assert_eq!(entries[0].deviations, vec![DeviationRef::new("acme-system-devs")]);
    assert_eq!(entries[1].module_name, "ietf-inet-types");
    assert_eq!(entries[1].conformance_type, Some(ConformanceType::Import));
}

#[test]
fn test_unknown_document() {
    let result = CapabilityDocument::from_xml("<rpc-reply><ok/></rpc-reply>");
    assert!(matches!(result, Err(CapabilityError::UnknownDocument(root)) if root == "rpc-reply"));
}

#[test]
fn test_malformed_xml() {
    let result = CapabilityDocument::from_xml("<hello><capabilities>");
    assert!(matches!(result, Err(CapabilityError::Xml(_))));
}

#[test]
fn test_from_file_missing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = CapabilityDocument::from_file(&temp_dir.path().join("missing.xml"));
    assert!(matches!(result, Err(CapabilityError::Io { .. })));
}

#[test]
fn test_from_file_hello() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("capabilities.xml");
    fs::write(&path, HELLO).expect("Failed to write file");

    let document = CapabilityDocument::from_file(&path).expect("Failed to parse");
    assert!(matches!(document, CapabilityDocument::Hello(_)));
}
