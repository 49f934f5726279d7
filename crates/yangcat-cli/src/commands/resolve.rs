//! Resolve command: Resolve one capability file and print its catalog

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use yangcat_core::catalog::{IntegrityReport, PrepareDocument};
use yangcat_core::{CatalogRecord, InMemoryCatalog, InMemoryIntegrity};

use super::populate::{device_locator, prepare_device, resolve_device};

/// Run the resolve command
///
/// Prints the resolved modules as a `prepare.json` document on stdout and
/// the integrity findings on stderr.
///
/// # Errors
/// Returns an error if the capability file cannot be read or the output
/// cannot be serialized.
pub fn run(capability_file: &Path, search_roots: &[PathBuf], vendor_dir: Option<&Path>) -> Result<()> {
    let (records, report) = resolve_file(capability_file, search_roots, vendor_dir)?;

    let document = PrepareDocument::from_records(&records);
    println!("{}", serde_json::to_string_pretty(&document)?);

    for (device, findings) in &report {
        for name in &findings.missing_modules {
            eprintln!("{device}: missing module {name}");
        }
        for file in &findings.unparsable_files {
            eprintln!("{device}: unparsable file {file}");
        }
    }
    Ok(())
}

/// Resolve a single capability file
///
/// The file's directory is searched first, then the given roots. The
/// vendor root used for layout-derived context defaults to the file's
/// directory.
///
/// # Errors
/// Returns an error if the capability file cannot be read or parsed.
pub fn resolve_file(
    capability_file: &Path,
    search_roots: &[PathBuf],
    vendor_dir: Option<&Path>,
) -> Result<(Vec<CatalogRecord>, IntegrityReport)> {
    let file_dir = capability_file.parent().unwrap_or_else(|| Path::new("."));
    let vendor_dir = vendor_dir.unwrap_or(file_dir);
    let locator = device_locator(capability_file, search_roots, file_dir);

    let job = prepare_device(capability_file, vendor_dir, locator, None)
        .with_context(|| format!("Failed to read {}", capability_file.display()))?;

    let catalog = InMemoryCatalog::new();
    let integrity = InMemoryIntegrity::new();
    let count = resolve_device(job, &catalog, &integrity)?;
    info!("Resolved {} modules for {}", count, capability_file.display());

    Ok((catalog.into_records()?, integrity.report()?))
}
