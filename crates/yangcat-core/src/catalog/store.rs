//! In-memory catalog store and integrity tracker

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::export::IntegrityReport;
use super::{
    CatalogError, CatalogRecord, CatalogStore, IntegrityGap, IntegrityTracker, ParseFailure,
};

/// Catalog store that keeps records in append order
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    records: Mutex<Vec<CatalogRecord>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended records
    ///
    /// # Errors
    /// Returns an error if a writer panicked while holding the lock.
    pub fn records(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|_| CatalogError::Poisoned("catalog"))
    }

    /// Consume the store, returning its records
    ///
    /// # Errors
    /// Returns an error if a writer panicked while holding the lock.
    pub fn into_records(self) -> Result<Vec<CatalogRecord>, CatalogError> {
        self.records
            .into_inner()
            .map_err(|_| CatalogError::Poisoned("catalog"))
    }
}

impl CatalogStore for InMemoryCatalog {
    fn append(&self, record: CatalogRecord) -> Result<(), CatalogError> {
        self.records
            .lock()
            .map_err(|_| CatalogError::Poisoned("catalog"))?
            .push(record);
        Ok(())
    }
}

/// Integrity findings for one device or SDO source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeviceIntegrity {
    pub missing_modules: Vec<String>,
    pub unparsable_files: Vec<String>,
}

/// Integrity tracker keyed by device path
#[derive(Debug, Default)]
pub struct InMemoryIntegrity {
    devices: Mutex<BTreeMap<String, DeviceIntegrity>>,
}

impl InMemoryIntegrity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all findings
    ///
    /// # Errors
    /// Returns an error if a writer panicked while holding the lock.
    pub fn report(&self) -> Result<IntegrityReport, CatalogError> {
        self.devices
            .lock()
            .map(|devices| devices.clone())
            .map_err(|_| CatalogError::Poisoned("integrity"))
    }
}

impl IntegrityTracker for InMemoryIntegrity {
    fn record_gap(&self, gap: IntegrityGap) -> Result<(), CatalogError> {
        let mut devices = self
            .devices
            .lock()
            .map_err(|_| CatalogError::Poisoned("integrity"))?;
        let device = devices.entry(gap.device_path).or_default();
        for name in gap.missing_module_names {
            if !device.missing_modules.contains(&name) {
                device.missing_modules.push(name);
            }
        }
        Ok(())
    }

    fn record_failure(&self, source: &str, failure: ParseFailure) -> Result<(), CatalogError> {
        let mut devices = self
            .devices
            .lock()
            .map_err(|_| CatalogError::Poisoned("integrity"))?;
        devices
            .entry(source.to_string())
            .or_default()
            .unparsable_files
            .push(failure.path.display().to_string());
        Ok(())
    }
}
