//! Tests for Cataloger and the in-memory collaborators

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use crate::catalog::model::{ConformanceType, DeviationRef, ModuleDescriptor, ModuleType};
use crate::catalog::{
    CatalogStore, Cataloger, InMemoryCatalog, InMemoryIntegrity, IntegrityGap, ParseFailure,
};
use crate::platform::{DeviceContext, PlatformFlavor};
use crate::resolve::ResolutionOutcome;

pub(super) fn descriptor(name: &str, revision: &str, organization: &str) -> ModuleDescriptor {
    ModuleDescriptor {
        name: name.to_string(),
        revision: revision.to_string(),
        organization: organization.to_string(),
        namespace: Some(format!("urn:{organization}:{name}")),
        prefix: Some(name.to_string()),
        module_type: ModuleType::Module,
        belongs_to: None,
        yang_version: "1.1".to_string(),
        semantic_version: None,
        schema_url: None,
        conformance_type: Some(ConformanceType::Implement),
        submodules: Vec::new(),
        imports: Vec::new(),
        features: vec!["candidate".to_string()],
        deviations: vec![DeviationRef::new("acme-devs")],
        path: PathBuf::from(format!("/models/{name}.yang")),
        content_hash: String::new(),
    }
}

fn device(platforms: &[&str]) -> DeviceContext {
    let mut device = DeviceContext::new(Path::new("/vendor/acme/1.0/caps.xml"), "acme");
    device.os_type = "AcmeOS".to_string();
    device.software_version = "1.0".to_string();
    device.capabilities = vec!["urn:ietf:params:netconf:capability:candidate:1.0".to_string()];
    device.netconf_versions = vec!["urn:ietf:params:netconf:base:1.1".to_string()];
    device.platforms = platforms
        .iter()
        .map(|p| PlatformFlavor {
            platform: (*p).to_string(),
            software_flavor: "ALL".to_string(),
        })
        .collect();
    device
}

#[test]
fn test_commit_attaches_one_implementation_per_platform() {
    let store = InMemoryCatalog::new();
    let integrity = InMemoryIntegrity::new();
    let outcome = ResolutionOutcome {
        records: vec![descriptor("foo", "2020-01-01", "acme")],
        ..ResolutionOutcome::default()
    };

    let keys = Cataloger::new(&store, &integrity)
        .commit(&device(&["box-a", "box-b"]), outcome)
        .expect("Failed to commit");

    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].to_string(), "foo@2020-01-01/acme");

    let records = store.records().expect("Failed to read records");
    let implementations = &records[0].implementations;
    assert_eq!(implementations.len(), 2);
    assert_eq!(implementations[0].platform, "box-a");
    assert_eq!(implementations[1].platform, "box-b");
    assert_eq!(implementations[0].vendor, "acme");
    assert_eq!(implementations[0].os_type, "AcmeOS");
    assert_eq!(implementations[0].features, vec!["candidate"]);
    assert_eq!(implementations[0].deviations, vec![DeviationRef::new("acme-devs")]);
    assert_eq!(
        implementations[0].conformance_type,
        Some(ConformanceType::Implement)
    );
    assert_eq!(
        implementations[0].netconf_versions,
        vec!["urn:ietf:params:netconf:base:1.1"]
    );
}

#[test]
fn test_commit_without_platforms_uses_unknown() {
    let store = InMemoryCatalog::new();
    let integrity = InMemoryIntegrity::new();
    let outcome = ResolutionOutcome {
        records: vec![descriptor("foo", "2020-01-01", "acme")],
        ..ResolutionOutcome::default()
    };

    Cataloger::new(&store, &integrity)
        .commit(&device(&[]), outcome)
        .expect("Failed to commit");

    let records = store.into_records().expect("Failed to read records");
    assert_eq!(records[0].implementations.len(), 1);
    assert_eq!(records[0].implementations[0].platform, "Unknown");
}

#[test]
fn test_duplicate_keys_from_two_devices_are_kept() {
    let store = InMemoryCatalog::new();
    let integrity = InMemoryIntegrity::new();
    let cataloger = Cataloger::new(&store, &integrity);

    for platform in ["box-a", "box-b"] {
        let outcome = ResolutionOutcome {
            records: vec![descriptor("foo", "2020-01-01", "acme")],
            ..ResolutionOutcome::default()
        };
        cataloger
            .commit(&device(&[platform]), outcome)
            .expect("Failed to commit");
    }

    let records = store.records().expect("Failed to read records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].key, records[1].key);
    assert_eq!(records[0].implementations[0].platform, "box-a");
    assert_eq!(records[1].implementations[0].platform, "box-b");
}

#[test]
fn test_commit_reports_gaps_and_failures() {
    let store = InMemoryCatalog::new();
    let integrity = InMemoryIntegrity::new();
    let device = device(&["box"]);
    let outcome = ResolutionOutcome {
        records: Vec::new(),
        gaps: vec![
            IntegrityGap {
                device_path: device.device_path.clone(),
                missing_module_names: vec!["gone".to_string()],
            },
            IntegrityGap {
                device_path: device.device_path.clone(),
                missing_module_names: vec!["gone".to_string(), "lost".to_string()],
            },
        ],
        failures: vec![ParseFailure {
            path: PathBuf::from("/models/broken.yang"),
            message: "Unexpected end of input".to_string(),
        }],
    };

    let keys = Cataloger::new(&store, &integrity)
        .commit(&device, outcome)
        .expect("Failed to commit");

    assert!(keys.is_empty());
    let report = integrity.report().expect("Failed to read report");
    let findings = &report["/vendor/acme/1.0/caps.xml"];
    assert_eq!(findings.missing_modules, vec!["gone", "lost"]);
    assert_eq!(findings.unparsable_files, vec!["/models/broken.yang"]);
}

#[test]
fn test_commit_sdo_has_no_implementations() {
    let store = InMemoryCatalog::new();
    let integrity = InMemoryIntegrity::new();
    let mut module = descriptor("ietf-ip", "2018-02-22", "ietf");
    module.conformance_type = None;
    let outcome = ResolutionOutcome {
        records: vec![module],
        ..ResolutionOutcome::default()
    };

    let keys = Cataloger::new(&store, &integrity)
        .commit_sdo("/standard/ietf", outcome)
        .expect("Failed to commit");

    assert_eq!(keys[0].to_string(), "ietf-ip@2018-02-22/ietf");
    let records = store.records().expect("Failed to read records");
    assert!(records[0].implementations.is_empty());
}

#[test]
fn test_store_accepts_concurrent_appends() {
    let store = InMemoryCatalog::new();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let store = &store;
            scope.spawn(move || {
                let module = descriptor(&format!("m{i}"), "2020-01-01", "acme");
                store
                    .append(crate::catalog::CatalogRecord {
                        key: module.key(),
                        module,
                        implementations: Vec::new(),
                    })
                    .expect("Failed to append");
            });
        }
    });

    assert_eq!(store.records().expect("Failed to read records").len(), 8);
}
