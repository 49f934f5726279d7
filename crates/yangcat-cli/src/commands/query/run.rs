//! Query command: Execute queries against the catalog graph

use anyhow::{Context, Result};
use tracing::info;
use yangcat_core::Neo4jClient;

use crate::commands::types::{Neo4jArgs, QueryCommands};

/// Run the query command
///
/// # Errors
/// Returns an error if no password was given, the connection fails or the
/// query fails.
pub async fn run(cmd: QueryCommands, neo4j: &Neo4jArgs) -> Result<()> {
    let config = neo4j
        .config()
        .context("--neo4j-password is required for queries")?;
    let client = Neo4jClient::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to Neo4j as {config}"))?;

    match cmd {
        QueryCommands::Modules { pattern } => {
            run_find_modules(&client, &pattern).await?;
        }
        QueryCommands::Vendor { vendor, platform } => {
            run_vendor(&client, &vendor, platform.as_deref()).await?;
        }
        QueryCommands::Deps { key } => {
            run_deps(&client, &key).await?;
        }
        QueryCommands::Stats => {
            run_stats(&client).await?;
        }
    }

    Ok(())
}

async fn run_find_modules(client: &Neo4jClient, pattern: &str) -> Result<()> {
    info!("Finding modules matching '{}'...", pattern);
    let modules = client.find_modules(pattern).await?;

    if modules.is_empty() {
        println!("No modules found matching '{}'", pattern);
        return Ok(());
    }

    println!(
        "\n{:<45} {:<12} {:<20} {:<10} IMPLS",
        "NAME", "REVISION", "ORGANIZATION", "TYPE"
    );
    println!("{}", "-".repeat(100));

    for m in &modules {
        println!(
            "{:<45} {:<12} {:<20} {:<10} {}",
            truncate_str(&m.name, 45),
            m.revision,
            truncate_str(&m.organization, 20),
            m.module_type,
            m.implementation_count,
        );
    }

    println!("\nFound {} modules", modules.len());
    Ok(())
}

async fn run_vendor(client: &Neo4jClient, vendor: &str, platform: Option<&str>) -> Result<()> {
    info!("Listing modules implemented by '{}'...", vendor);
    let implementations = client.modules_by_vendor(vendor, platform).await?;

    if implementations.is_empty() {
        println!("No modules found for vendor '{}'", vendor);
        return Ok(());
    }

    println!(
        "\n{:<15} {:<12} {:<10} {:<55} CONFORMANCE",
        "PLATFORM", "VERSION", "OS", "MODULE"
    );
    println!("{}", "-".repeat(110));

    for i in &implementations {
        println!(
            "{:<15} {:<12} {:<10} {:<55} {}",
            truncate_str(&i.platform, 15),
            truncate_str(&i.software_version, 12),
            truncate_str(&i.os_type, 10),
            truncate_str(&i.key, 55),
            i.conformance_type,
        );
    }

    println!("\nFound {} implemented modules", implementations.len());
    Ok(())
}

async fn run_deps(client: &Neo4jClient, key: &str) -> Result<()> {
    info!("Finding dependencies of '{}'...", key);
    let dependencies = client.dependencies_of(key).await?;

    if dependencies.is_empty() {
        println!("'{}' has no recorded dependencies", key);
        return Ok(());
    }

    println!("\n{:<10} MODULE", "EDGE");
    println!("{}", "-".repeat(80));

    for d in &dependencies {
        println!("{:<10} {}", d.kind, truncate_path(&d.key, 70));
    }

    println!("\n'{}' depends on {} modules", key, dependencies.len());
    Ok(())
}

async fn run_stats(client: &Neo4jClient) -> Result<()> {
    info!("Getting graph statistics...");
    let stats = client.stats().await?;

    println!("\n=== Catalog Statistics ===\n");
    println!("Nodes:");
    println!("  Modules:         {}", stats.modules);
    println!("  Implementations: {}", stats.implementations);
    println!("  CatalogRuns:     {}", stats.catalog_runs);
    println!("  Vendors:         {}", stats.vendors);
    println!("\nRelationships:");
    println!("  IMPORTS:    {}", stats.imports);
    println!("  INCLUDES:   {}", stats.includes);
    println!("  IMPLEMENTS: {}", stats.implements);
    Ok(())
}

pub(super) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

pub(super) fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        path.to_string()
    } else {
        // Keep the end, it carries the organization
        format!("...{}", &path[path.len() - max_len + 3..])
    }
}
