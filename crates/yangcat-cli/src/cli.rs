//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::types::{Neo4jArgs, QueryCommands};

#[derive(Parser)]
#[command(name = "yangcat")]
#[command(author, version, about = "YANG module catalog ingestion tool", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every capability file below a vendor tree and export the catalog
    Populate {
        /// Directory holding `<vendor>/<os>/<version>/` capability files
        vendor_dir: PathBuf,

        /// Schema search roots, highest priority first (defaults to the vendor directory)
        #[arg(long = "search-root")]
        search_roots: Vec<PathBuf>,

        /// Directory for prepare.json, normal.json and integrity.json
        #[arg(long, short, default_value = "out")]
        output: PathBuf,

        /// Local git checkout used to build schema URLs
        #[arg(long)]
        source_repo: Option<PathBuf>,

        /// Version tag for this catalog run
        #[arg(long)]
        version: Option<String>,

        #[command(flatten)]
        neo4j: Neo4jArgs,
    },

    /// Resolve a single capability file and print its catalog
    Resolve {
        /// Hello message or YANG-Library document
        capability_file: PathBuf,

        /// Schema search roots, highest priority first (defaults to the file's directory)
        #[arg(long = "search-root")]
        search_roots: Vec<PathBuf>,

        /// Vendor tree root used to derive vendor, OS and platform from the path
        #[arg(long)]
        vendor_dir: Option<PathBuf>,
    },

    /// Catalog standalone SDO modules found below a directory
    Sdo {
        /// Directory holding `.yang` files
        dir: PathBuf,

        /// Directory for prepare.json, normal.json and integrity.json
        #[arg(long, short, default_value = "out")]
        output: PathBuf,

        /// Local git checkout used to build schema URLs
        #[arg(long)]
        source_repo: Option<PathBuf>,

        #[command(flatten)]
        neo4j: Neo4jArgs,
    },

    /// Query the catalog graph
    Query {
        #[command(subcommand)]
        command: QueryCommands,

        #[command(flatten)]
        neo4j: Neo4jArgs,
    },
}
