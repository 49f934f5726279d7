//! Command types shared between main and library

use clap::{Args, Subcommand};
use yangcat_core::graph::neo4j::{DEFAULT_URI, DEFAULT_USER};
use yangcat_core::Neo4jConfig;

#[derive(Subcommand)]
pub enum QueryCommands {
    /// Find modules by name pattern
    Modules {
        /// Pattern to search for (case-insensitive)
        pattern: String,
    },
    /// List modules implemented by a vendor
    Vendor {
        /// Vendor name, e.g. cisco
        vendor: String,
        /// Restrict to one platform
        #[arg(long)]
        platform: Option<String>,
    },
    /// Show the imports and includes of a module
    Deps {
        /// Catalog key `name@revision/organization`
        key: String,
    },
    /// Show graph statistics
    Stats,
}

/// Connection options for the catalog graph
#[derive(Args, Debug, Clone)]
pub struct Neo4jArgs {
    /// Neo4j connection URI
    #[arg(long, default_value = DEFAULT_URI)]
    pub neo4j_uri: String,

    /// Neo4j username
    #[arg(long, default_value = DEFAULT_USER)]
    pub neo4j_user: String,

    /// Neo4j password; graph storage is skipped without one
    #[arg(long)]
    pub neo4j_password: Option<String>,
}

impl Neo4jArgs {
    /// Connection config, if a password was given
    #[must_use]
    pub fn config(&self) -> Option<Neo4jConfig> {
        self.neo4j_password
            .as_deref()
            .map(|password| Neo4jConfig::new(&self.neo4j_uri, &self.neo4j_user, password))
    }
}
