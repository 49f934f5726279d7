//! Tests for catalog model types

use rstest::rstest;

use crate::catalog::model::{CatalogKey, ConformanceType, EdgeKind};

#[test]
fn test_catalog_key_display_and_parse() {
    let key = CatalogKey::new("ietf-interfaces", "2018-02-20", "ietf");
    assert_eq!(key.to_string(), "ietf-interfaces@2018-02-20/ietf");
    assert_eq!("ietf-interfaces@2018-02-20/ietf".parse::<CatalogKey>(), Ok(key));
}

#[rstest]
#[case("no-at-sign/ietf")]
#[case("name@revision-without-org")]
fn test_catalog_key_parse_errors(#[case] input: &str) {
    assert!(input.parse::<CatalogKey>().is_err());
}

#[test]
fn test_conformance_type_parse() {
    assert_eq!(" implement ".parse::<ConformanceType>(), Ok(ConformanceType::Implement));
    assert_eq!("import".parse::<ConformanceType>(), Ok(ConformanceType::Import));
    assert!("none".parse::<ConformanceType>().is_err());
}

#[test]
fn test_edge_kind_display() {
    assert_eq!(EdgeKind::Include.to_string(), "INCLUDES");
    assert_eq!(EdgeKind::Import.to_string(), "IMPORTS");
}
