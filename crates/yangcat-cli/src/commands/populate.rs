//! Populate command: Resolve every device below a vendor tree
//!
//! Each capability file is turned into a device context and capability set
//! up front. Resolution then runs per device on the blocking pool, and all
//! devices append into one shared catalog and integrity tracker before the
//! exports are written. Every device searches its own directory before the
//! configured roots.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use tracing::{info, warn};
use yangcat_core::capability::CapabilityError;
use yangcat_core::catalog::{CatalogError, ParseFailure};
use yangcat_core::{
    write_exports, CapabilitySet, CapabilitySource, CatalogRun, Cataloger, DeviceContext,
    InMemoryCatalog,
    InMemoryIntegrity, IntegrityTracker, ModuleLocator, PlatformMetadata, ResolutionEngine,
    Scanner, SchemaSource, YangParser,
};

use super::store::store_records;
use super::types::Neo4jArgs;

/// Inputs of one populate run
#[derive(Debug, Clone)]
pub struct PopulateOptions {
    pub vendor_dir: PathBuf,
    /// Highest priority first; empty means the vendor directory
    pub search_roots: Vec<PathBuf>,
    pub output: PathBuf,
    pub source_repo: Option<PathBuf>,
    pub version: Option<String>,
}

/// What a populate run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateSummary {
    pub devices: usize,
    /// Capability files that could not be read
    pub skipped: usize,
    pub records: usize,
    pub exports: Vec<PathBuf>,
    /// Catalog run the records were stored under, if Neo4j was used
    pub run_id: Option<String>,
}

/// A device ready for resolution
#[derive(Debug, Clone)]
pub struct DeviceJob {
    pub capability_set: CapabilitySet,
    pub device: DeviceContext,
    pub locator: ModuleLocator,
}

/// Run the populate command
///
/// # Errors
/// Returns an error if the vendor directory does not exist, the source
/// repository is not a usable checkout, a resolution task fails, or the
/// exports or graph writes fail.
pub async fn run(options: &PopulateOptions, neo4j: &Neo4jArgs) -> Result<PopulateSummary> {
    info!("Populating catalog from {}", options.vendor_dir.display());
    if !options.vendor_dir.is_dir() {
        bail!(
            "Vendor directory not found: {}",
            options.vendor_dir.display()
        );
    }

    let mut run = CatalogRun::new(options.vendor_dir.display().to_string()).with_git_info();
    if let Some(version) = &options.version {
        run = run.with_version(version);
    }

    let repo_source = options
        .source_repo
        .as_deref()
        .map(|path| {
            SchemaSource::from_checkout(path)
                .with_context(|| format!("Failed to open source repository {}", path.display()))
        })
        .transpose()?;
    if let Some(source) = &repo_source {
        run = run.with_schema_source(source);
    }

    let catalog = Arc::new(InMemoryCatalog::new());
    let integrity = Arc::new(InMemoryIntegrity::new());

    let mut tasks = Vec::new();
    let mut skipped = 0;
    for file in Scanner::new(&options.vendor_dir).capability_files() {
        let locator = device_locator(&file.path, &options.search_roots, &options.vendor_dir);
        let prepared = prepare_device(
            &file.path,
            &options.vendor_dir,
            locator,
            repo_source.as_ref(),
        );
        let job = match prepared {
            Ok(job) => job,
            Err(e) => {
                warn!("Skipping {}: {}", file.path.display(), e);
                skipped += 1;
                integrity.record_failure(
                    &file.path.display().to_string(),
                    ParseFailure {
                        path: file.path.clone(),
                        message: e.to_string(),
                    },
                )?;
                continue;
            }
        };

        let catalog = Arc::clone(&catalog);
        let integrity = Arc::clone(&integrity);
        tasks.push(tokio::task::spawn_blocking(move || {
            resolve_device(job, catalog.as_ref(), integrity.as_ref())
        }));
    }

    let devices = tasks.len();
    info!("Resolving {} devices", devices);
    for result in join_all(tasks).await {
        result.context("Device resolution task failed")??;
    }

    let records = catalog.records()?;
    let report = integrity.report()?;
    let exports = write_exports(&options.output, &records, &report)
        .with_context(|| format!("Failed to write exports to {}", options.output.display()))?;

    let run = run.finish(devices, records.len());
    let stored = store_records(neo4j, &run, &records).await?;

    info!(
        "Populate complete: {} devices, {} skipped, {} records",
        devices,
        skipped,
        records.len()
    );
    Ok(PopulateSummary {
        devices,
        skipped,
        records: records.len(),
        exports,
        run_id: stored.then_some(run.id),
    })
}

/// Locator for one device
///
/// The directory holding the capability file comes first, followed by the
/// given roots, or by `fallback` when none were given. A root already in
/// the list is not searched twice.
#[must_use]
pub fn device_locator(
    capability_file: &Path,
    search_roots: &[PathBuf],
    fallback: &Path,
) -> ModuleLocator {
    let device_dir = capability_file.parent().unwrap_or_else(|| Path::new("."));
    let configured = if search_roots.is_empty() {
        vec![fallback.to_path_buf()]
    } else {
        search_roots.to_vec()
    };

    configured
        .into_iter()
        .fold(ModuleLocator::new([device_dir]), |locator, root| {
            if locator.roots().contains(&root) {
                locator
            } else {
                locator.with_root(root)
            }
        })
}

/// Read a capability file and derive its device context
///
/// Platform metadata beside the file takes precedence over the directory
/// layout. A metadata file that cannot be parsed is ignored with a warning.
///
/// # Errors
/// Returns an error if the capability file cannot be read or parsed.
pub fn prepare_device(
    capability_file: &Path,
    vendor_dir: &Path,
    locator: ModuleLocator,
    repo_source: Option<&SchemaSource>,
) -> Result<DeviceJob, CapabilityError> {
    let metadata = match PlatformMetadata::beside(capability_file) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Ignoring platform metadata for {}: {}", capability_file.display(), e);
            None
        }
    };

    let capability_set = CapabilitySource::load(capability_file, metadata.as_ref())?.normalize();

    let device = metadata
        .as_ref()
        .and_then(|m| DeviceContext::from_metadata(capability_file, m.platforms_for(capability_file)))
        .unwrap_or_else(|| DeviceContext::from_layout(capability_file, vendor_dir))
        .with_capabilities(&capability_set);
    let device = match repo_source {
        Some(source) => device.with_schema_source(source.clone()),
        None => device,
    };

    Ok(DeviceJob {
        capability_set,
        device,
        locator,
    })
}

/// Resolve one device and catalog the outcome
///
/// # Errors
/// Returns an error if the catalog or the tracker rejects an append.
pub fn resolve_device(
    job: DeviceJob,
    catalog: &InMemoryCatalog,
    integrity: &InMemoryIntegrity,
) -> Result<usize, CatalogError> {
    let parser = YangParser::new();
    let engine = ResolutionEngine::new(&parser, job.locator);
    let outcome = engine.resolve(&job.capability_set, &job.device);
    let keys = Cataloger::new(catalog, integrity).commit(&job.device, outcome)?;
    Ok(keys.len())
}
