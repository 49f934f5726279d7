//! SDO command: Catalog standalone modules below a directory

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;
use yangcat_core::{
    write_exports, CatalogRun, Cataloger, DeviceContext, InMemoryCatalog, InMemoryIntegrity,
    ModuleLocator, ResolutionEngine, Scanner, SchemaSource, YangParser,
};

use super::store::store_records;
use super::types::Neo4jArgs;

/// Vendor recorded on the pseudo device of an SDO run
const SDO_VENDOR: &str = "sdo";

/// Run the SDO command and return the number of cataloged modules
///
/// # Errors
/// Returns an error if the directory does not exist, the source repository
/// is not a usable checkout, or the exports or graph writes fail.
pub async fn run(
    dir: &Path,
    output: &Path,
    source_repo: Option<&Path>,
    neo4j: &Neo4jArgs,
) -> Result<usize> {
    info!("Cataloging SDO modules from {}", dir.display());
    if !dir.is_dir() {
        bail!("SDO directory not found: {}", dir.display());
    }

    let mut run = CatalogRun::new(dir.display().to_string()).with_git_info();
    let mut device = DeviceContext::new(dir, SDO_VENDOR);
    if let Some(path) = source_repo {
        let source = SchemaSource::from_checkout(path)
            .with_context(|| format!("Failed to open source repository {}", path.display()))?;
        run = run.with_schema_source(&source);
        device = device.with_schema_source(source);
    }

    let files: Vec<PathBuf> = Scanner::new(dir).schema_files().collect();
    info!("Found {} schema files", files.len());

    let parser = YangParser::new();
    let engine = ResolutionEngine::new(&parser, ModuleLocator::new([dir]));
    let outcome = engine.resolve_files(&files, &device);

    let catalog = InMemoryCatalog::new();
    let integrity = InMemoryIntegrity::new();
    let keys = Cataloger::new(&catalog, &integrity).commit_sdo(&device.device_path, outcome)?;

    let records = catalog.into_records()?;
    write_exports(output, &records, &integrity.report()?)
        .with_context(|| format!("Failed to write exports to {}", output.display()))?;
    store_records(neo4j, &run.finish(1, records.len()), &records).await?;

    Ok(keys.len())
}
