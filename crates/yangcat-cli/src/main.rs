//! yangcat: YANG module catalog ingestion

use clap::Parser;
use yangcat_cli::commands;
use yangcat_cli::logging::setup_logging;
use yangcat_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Populate {
            vendor_dir,
            search_roots,
            output,
            source_repo,
            version,
            neo4j,
        } => {
            let options = commands::populate::PopulateOptions {
                vendor_dir,
                search_roots,
                output,
                source_repo,
                version,
            };
            commands::populate::run(&options, &neo4j).await?;
        }
        Commands::Resolve {
            capability_file,
            search_roots,
            vendor_dir,
        } => {
            commands::resolve::run(&capability_file, &search_roots, vendor_dir.as_deref())?;
        }
        Commands::Sdo {
            dir,
            output,
            source_repo,
            neo4j,
        } => {
            commands::sdo::run(&dir, &output, source_repo.as_deref(), &neo4j).await?;
        }
        Commands::Query { command, neo4j } => {
            commands::query::run(command, &neo4j).await?;
        }
    }

    Ok(())
}
