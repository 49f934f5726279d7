//! Tests for capability URI parsing

use rstest::rstest;

use crate::capability::{classify_capabilities, parse_capability_uri};
use crate::catalog::model::DeviationRef;

#[test]
fn test_parse_module_with_revision() {
    let entry = parse_capability_uri(
        "http://cisco.com/ns/yang/Cisco-IOS-XR-types?module=Cisco-IOS-XR-types&revision=2019-04-05",
    )
    .expect("Expected an entry");

    assert_eq!(entry.module_name, "Cisco-IOS-XR-types");
    assert_eq!(entry.revision.as_deref(), Some("2019-04-05"));
    assert!(entry.features.is_empty());
    assert!(entry.conformance_type.is_none());
}

#[test]
fn test_parse_features_and_deviations() {
    let entry = parse_capability_uri(
        "urn:ietf:params:xml:ns:yang:ietf-interfaces?module=ietf-interfaces&revision=2014-05-08&features=pre-provisioning,if-mib,arbitrary-names&deviations=cisco-xr-ietf-interfaces-deviations",
    )
    .expect("Expected an entry");

    assert_eq!(
        entry.features,
        vec!["pre-provisioning", "if-mib", "arbitrary-names"]
    );
    assert_eq!(
        entry.deviations,
        vec![DeviationRef::new("cisco-xr-ietf-interfaces-deviations")]
    );
}

#[test]
fn test_parse_without_revision() {
    let entry = parse_capability_uri("http://openconfig.net/yang/bgp?module=openconfig-bgp")
        .expect("Expected an entry");

    assert_eq!(entry.module_name, "openconfig-bgp");
    assert_eq!(entry.revision, None);
}

#[rstest]
#[case("urn:ietf:params:netconf:base:1.1")]
#[case("urn:ietf:params:netconf:capability:candidate:1.0")]
#[case("http://example.com/ns?module=")]
#[case("")]
fn test_parse_non_module_uri(#[case] uri: &str) {
    assert!(parse_capability_uri(uri).is_none());
}

#[test]
fn test_classify_capabilities() {
    let uris = [
        "urn:ietf:params:netconf:base:1.0",
        "urn:ietf:params:netconf:base:1.1",
        "urn:ietf:params:netconf:capability:with-defaults:1.0?basic-mode=explicit",
        "urn:ietf:params:netconf:capability:candidate:1.0",
        "http://cisco.com/ns/yang/Cisco-IOS-XR-types?module=Cisco-IOS-XR-types&revision=2019-04-05",
    ];

    let (capabilities, versions) = classify_capabilities(&uris);

    assert_eq!(
        versions,
        vec![
            "urn:ietf:params:netconf:base:1.0",
            "urn:ietf:params:netconf:base:1.1"
        ]
    );
    assert_eq!(
        capabilities,
        vec![
            "urn:ietf:params:netconf:capability:with-defaults:1.0",
            "urn:ietf:params:netconf:capability:candidate:1.0"
        ]
    );
}
