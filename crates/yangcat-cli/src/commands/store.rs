//! Graph storage shared by the ingestion commands

use anyhow::{Context, Result};
use tracing::info;
use yangcat_core::{CatalogRecord, CatalogRun, Neo4jClient};

use super::types::Neo4jArgs;

/// Store a finished run and its records in Neo4j
///
/// Does nothing and returns `false` when no password was given.
///
/// # Errors
/// Returns an error if the connection or a write fails.
pub(super) async fn store_records(
    neo4j: &Neo4jArgs,
    run: &CatalogRun,
    records: &[CatalogRecord],
) -> Result<bool> {
    let Some(config) = neo4j.config() else {
        info!("No Neo4j password given, skipping graph storage");
        return Ok(false);
    };

    let client = Neo4jClient::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to Neo4j as {config}"))?;

    client
        .create_catalog_run(run)
        .await
        .context("Failed to create catalog run")?;
    let stored = client
        .insert_records(&run.id, records)
        .await
        .context("Failed to store catalog records")?;
    client
        .finish_catalog_run(run)
        .await
        .context("Failed to finish catalog run")?;

    info!("Stored {} records in catalog run {}", stored, run.id);
    Ok(true)
}
