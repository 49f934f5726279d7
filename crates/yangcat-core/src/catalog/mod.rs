//! Catalog module: Records, stores and integrity tracking
//!
//! The [`Cataloger`] turns a resolution outcome into [`CatalogRecord`]s
//! annotated with one [`Implementation`] per device platform, appends them
//! to a [`CatalogStore`] and reports unresolvable modules and unparsable
//! files to an [`IntegrityTracker`].

pub mod export;
pub mod model;
mod store;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::platform::DeviceContext;
use crate::resolve::ResolutionOutcome;

pub use export::{write_exports, IntegrityReport, NormalDocument, PrepareDocument};
pub use model::{
    CatalogKey, CatalogRecord, ConformanceType, DeviationRef, EdgeKind, Implementation,
    ModuleDescriptor, ModuleRef, ModuleType,
};
pub use store::{DeviceIntegrity, InMemoryCatalog, InMemoryIntegrity};

/// Errors that can occur while cataloging
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} lock poisoned")]
    Poisoned(&'static str),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Modules a device advertised or depends on that no search root provides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityGap {
    pub device_path: String,
    pub missing_module_names: Vec<String>,
}

/// A schema file that was located but could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Destination for catalog records
pub trait CatalogStore: Send + Sync {
    /// Append one record. Records with equal keys are kept side by side.
    ///
    /// # Errors
    /// Returns an error if the store cannot accept the record.
    fn append(&self, record: CatalogRecord) -> Result<(), CatalogError>;
}

/// Destination for integrity findings
pub trait IntegrityTracker: Send + Sync {
    /// # Errors
    /// Returns an error if the finding cannot be recorded.
    fn record_gap(&self, gap: IntegrityGap) -> Result<(), CatalogError>;

    /// # Errors
    /// Returns an error if the finding cannot be recorded.
    fn record_failure(&self, source: &str, failure: ParseFailure) -> Result<(), CatalogError>;
}

/// Writes resolution outcomes into a store and an integrity tracker
pub struct Cataloger<'a, S: CatalogStore + ?Sized, T: IntegrityTracker + ?Sized> {
    store: &'a S,
    integrity: &'a T,
}

impl<'a, S: CatalogStore + ?Sized, T: IntegrityTracker + ?Sized> Cataloger<'a, S, T> {
    #[must_use]
    pub fn new(store: &'a S, integrity: &'a T) -> Self {
        Self { store, integrity }
    }

    /// Catalog the modules resolved for one device
    ///
    /// Every record carries one implementation per platform of `device`.
    /// Returns the keys in the order the records were appended.
    ///
    /// # Errors
    /// Returns an error if the store or the tracker rejects an append.
    pub fn commit(
        &self,
        device: &DeviceContext,
        outcome: ResolutionOutcome,
    ) -> Result<Vec<CatalogKey>, CatalogError> {
        self.report(&device.device_path, outcome.gaps, outcome.failures)?;

        let mut keys = Vec::with_capacity(outcome.records.len());
        for module in outcome.records {
            let implementations = implementations_for(device, &module);
            keys.push(self.append(module, implementations)?);
        }
        info!(
            "Cataloged {} modules for {}",
            keys.len(),
            device.device_path
        );
        Ok(keys)
    }

    /// Catalog standalone modules that no device implements
    ///
    /// # Errors
    /// Returns an error if the store or the tracker rejects an append.
    pub fn commit_sdo(
        &self,
        source: &str,
        outcome: ResolutionOutcome,
    ) -> Result<Vec<CatalogKey>, CatalogError> {
        self.report(source, outcome.gaps, outcome.failures)?;

        let mut keys = Vec::with_capacity(outcome.records.len());
        for module in outcome.records {
            keys.push(self.append(module, Vec::new())?);
        }
        info!("Cataloged {} SDO modules from {}", keys.len(), source);
        Ok(keys)
    }

    fn append(
        &self,
        module: ModuleDescriptor,
        implementations: Vec<Implementation>,
    ) -> Result<CatalogKey, CatalogError> {
        let key = module.key();
        debug!("Appending {}", key);
        self.store.append(CatalogRecord {
            key: key.clone(),
            module,
            implementations,
        })?;
        Ok(key)
    }

    fn report(
        &self,
        source: &str,
        gaps: Vec<IntegrityGap>,
        failures: Vec<ParseFailure>,
    ) -> Result<(), CatalogError> {
        for gap in gaps {
            self.integrity.record_gap(gap)?;
        }
        for failure in failures {
            self.integrity.record_failure(source, failure)?;
        }
        Ok(())
    }
}

fn implementations_for(device: &DeviceContext, module: &ModuleDescriptor) -> Vec<Implementation> {
    let implementation = |platform: &str, software_flavor: &str| Implementation {
        vendor: device.vendor.clone(),
        platform: platform.to_string(),
        software_version: device.software_version.clone(),
        software_flavor: software_flavor.to_string(),
        os_version: device.os_version.clone(),
        os_type: device.os_type.clone(),
        feature_set: device.feature_set.clone(),
        features: module.features.clone(),
        deviations: module.deviations.clone(),
        conformance_type: module.conformance_type,
        capabilities: device.capabilities.clone(),
        netconf_versions: device.netconf_versions.clone(),
    };

    if device.platforms.is_empty() {
        return vec![implementation("Unknown", "ALL")];
    }
    device
        .platforms
        .iter()
        .map(|p| implementation(&p.platform, &p.software_flavor))
        .collect()
}

#[cfg(test)]
mod tests;
