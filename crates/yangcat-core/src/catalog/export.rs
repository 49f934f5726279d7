//! JSON export documents
//!
//! - `prepare.json`: every record with its implementations
//! - `normal.json`: the same data arranged under vendor, platform, software
//!   version and flavor
//! - `integrity.json`: missing modules and unparsable files per device

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::model::{CatalogRecord, ConformanceType, DeviationRef, Implementation, ModuleRef};
use super::store::DeviceIntegrity;
use super::CatalogError;

pub const PREPARE_FILE: &str = "prepare.json";
pub const NORMAL_FILE: &str = "normal.json";
pub const INTEGRITY_FILE: &str = "integrity.json";

/// Integrity findings keyed by device path
pub type IntegrityReport = BTreeMap<String, DeviceIntegrity>;

/// `prepare.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareDocument {
    pub module: Vec<PreparedModule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PreparedModule {
    pub name: String,
    pub revision: String,
    pub organization: String,
    pub schema: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub yang_version: String,
    pub module_type: String,
    pub belongs_to: Option<String>,
    pub semantic_version: Option<String>,
    pub submodule: Vec<ModuleEntry>,
    pub dependencies: Vec<ModuleEntry>,
    pub implementations: Implementations,
}

/// Name and optional revision of a related module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub revision: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementations {
    pub implementation: Vec<ImplementationEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImplementationEntry {
    pub vendor: String,
    pub platform: String,
    pub software_version: String,
    pub software_flavor: String,
    pub os_version: String,
    pub feature_set: String,
    pub os_type: String,
    pub feature: Vec<String>,
    pub deviation: Vec<ModuleEntry>,
    pub conformance_type: Option<ConformanceType>,
}

impl PrepareDocument {
    #[must_use]
    pub fn from_records(records: &[CatalogRecord]) -> Self {
        let module = records
            .iter()
            .map(|record| {
                let m = &record.module;
                PreparedModule {
                    name: record.key.name.clone(),
                    revision: record.key.revision.clone(),
                    organization: record.key.organization.clone(),
                    schema: m.schema_url.clone(),
                    namespace: m.namespace.clone(),
                    prefix: m.prefix.clone(),
                    yang_version: m.yang_version.clone(),
                    module_type: m.module_type.to_string(),
                    belongs_to: m.belongs_to.clone(),
                    semantic_version: m.semantic_version.clone(),
                    submodule: m.submodules.iter().map(module_entry).collect(),
                    dependencies: m.imports.iter().map(module_entry).collect(),
                    implementations: Implementations {
                        implementation: record
                            .implementations
                            .iter()
                            .map(implementation_entry)
                            .collect(),
                    },
                }
            })
            .collect();
        Self { module }
    }
}

/// `normal.json`
///
/// One vendor branch per implementation of every record, in record order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalDocument {
    pub vendors: Vendors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendors {
    pub vendor: Vec<VendorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorEntry {
    pub name: String,
    pub platforms: PlatformEntries,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntries {
    pub platform: Vec<PlatformEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformEntry {
    pub name: String,
    pub software_versions: SoftwareVersions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SoftwareVersions {
    pub software_version: Vec<SoftwareVersionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SoftwareVersionEntry {
    pub name: String,
    pub software_flavors: SoftwareFlavors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SoftwareFlavors {
    pub software_flavor: Vec<SoftwareFlavorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareFlavorEntry {
    pub name: String,
    pub protocols: Protocols,
    pub modules: ImplementedModules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocols {
    pub protocol: Vec<ProtocolEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProtocolEntry {
    pub name: String,
    pub capabilities: Vec<String>,
    pub protocol_version: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementedModules {
    pub module: Vec<ImplementedModule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImplementedModule {
    pub name: String,
    pub revision: String,
    pub organization: String,
    pub os_version: String,
    pub feature_set: String,
    pub os_type: String,
    pub feature: Vec<String>,
    pub deviation: Vec<ModuleEntry>,
    pub conformance_type: Option<ConformanceType>,
}

impl NormalDocument {
    #[must_use]
    pub fn from_records(records: &[CatalogRecord]) -> Self {
        let vendor = records
            .iter()
            .flat_map(|record| record.implementations.iter().map(move |i| (record, i)))
            .map(|(record, implementation)| vendor_entry(record, implementation))
            .collect();
        Self {
            vendors: Vendors { vendor },
        }
    }
}

fn vendor_entry(record: &CatalogRecord, i: &Implementation) -> VendorEntry {
    let module = ImplementedModule {
        name: record.key.name.clone(),
        revision: record.key.revision.clone(),
        organization: record.key.organization.clone(),
        os_version: i.os_version.clone(),
        feature_set: i.feature_set.clone(),
        os_type: i.os_type.clone(),
        feature: i.features.clone(),
        deviation: i.deviations.iter().map(deviation_entry).collect(),
        conformance_type: i.conformance_type,
    };
    let flavor = SoftwareFlavorEntry {
        name: i.software_flavor.clone(),
        protocols: Protocols {
            protocol: vec![ProtocolEntry {
                name: "netconf".to_string(),
                capabilities: i.capabilities.clone(),
                protocol_version: i.netconf_versions.clone(),
            }],
        },
        modules: ImplementedModules {
            module: vec![module],
        },
    };
    VendorEntry {
        name: i.vendor.clone(),
        platforms: PlatformEntries {
            platform: vec![PlatformEntry {
                name: i.platform.clone(),
                software_versions: SoftwareVersions {
                    software_version: vec![SoftwareVersionEntry {
                        name: i.software_version.clone(),
                        software_flavors: SoftwareFlavors {
                            software_flavor: vec![flavor],
                        },
                    }],
                },
            }],
        },
    }
}

fn module_entry(reference: &ModuleRef) -> ModuleEntry {
    ModuleEntry {
        name: reference.name.clone(),
        revision: reference.revision.clone(),
    }
}

fn deviation_entry(deviation: &DeviationRef) -> ModuleEntry {
    ModuleEntry {
        name: deviation.name.clone(),
        revision: deviation.revision.clone(),
    }
}

fn implementation_entry(i: &Implementation) -> ImplementationEntry {
    ImplementationEntry {
        vendor: i.vendor.clone(),
        platform: i.platform.clone(),
        software_version: i.software_version.clone(),
        software_flavor: i.software_flavor.clone(),
        os_version: i.os_version.clone(),
        feature_set: i.feature_set.clone(),
        os_type: i.os_type.clone(),
        feature: i.features.clone(),
        deviation: i.deviations.iter().map(deviation_entry).collect(),
        conformance_type: i.conformance_type,
    }
}

/// Write `prepare.json`, `normal.json` and `integrity.json` into `dir`,
/// creating it if needed
///
/// # Errors
/// Returns an error if the directory or a file cannot be written.
pub fn write_exports(
    dir: &Path,
    records: &[CatalogRecord],
    integrity: &IntegrityReport,
) -> Result<Vec<PathBuf>, CatalogError> {
    std::fs::create_dir_all(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let written = vec![
        write_json(&dir.join(PREPARE_FILE), &PrepareDocument::from_records(records))?,
        write_json(&dir.join(NORMAL_FILE), &NormalDocument::from_records(records))?,
        write_json(&dir.join(INTEGRITY_FILE), integrity)?,
    ];
    info!("Wrote {} export files to {}", written.len(), dir.display());
    Ok(written)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, CatalogError> {
    let file = File::create(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
