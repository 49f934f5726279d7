//! Neo4j client for catalog storage

use std::fmt;
use std::sync::Arc;

use neo4rs::{ConfigBuilder, Graph, Query};
use thiserror::Error;
use tracing::debug;

/// Bolt URI of a local development instance
pub const DEFAULT_URI: &str = "bolt://localhost:7687";

/// Default Neo4j user
pub const DEFAULT_USER: &str = "neo4j";

/// Constraints and indexes the catalog queries rely on
const SCHEMA: &[(&str, &str)] = &[
    (
        "module_key",
        "CREATE CONSTRAINT module_key IF NOT EXISTS FOR (m:Module) REQUIRE m.key IS UNIQUE",
    ),
    (
        "module_name",
        "CREATE INDEX module_name IF NOT EXISTS FOR (m:Module) ON (m.name)",
    ),
    (
        "implementation_vendor",
        "CREATE INDEX implementation_vendor IF NOT EXISTS FOR (i:Implementation) ON (i.vendor, i.platform)",
    ),
    (
        "catalog_run_id",
        "CREATE INDEX catalog_run_id IF NOT EXISTS FOR (r:CatalogRun) ON (r.id)",
    ),
];

#[derive(Debug, Error)]
pub enum Neo4jError {
    #[error("Invalid connection settings: {0}")]
    Config(String),

    #[error("Failed to create schema element `{name}`: {source}")]
    Schema {
        name: &'static str,
        #[source]
        source: neo4rs::Error,
    },

    #[error("Neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),
}

/// Where the catalog graph lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    /// `None` uses the server's default database
    pub database: Option<String>,
}

impl Neo4jConfig {
    #[must_use]
    pub fn new(
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: None,
        }
    }

    /// Local instance with the default user
    #[must_use]
    pub fn local(password: impl Into<String>) -> Self {
        Self::new(DEFAULT_URI, DEFAULT_USER, password)
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}

impl fmt::Display for Neo4jConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.uri)?;
        if let Some(database) = &self.database {
            write!(f, "/{database}")?;
        }
        Ok(())
    }
}

/// Client for the catalog graph
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Connect and make sure the catalog constraints and indexes exist
    ///
    /// # Errors
    /// Returns an error if the settings are invalid, the connection fails,
    /// or a schema element cannot be created.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, Neo4jError> {
        let mut builder = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password);
        if let Some(database) = &config.database {
            builder = builder.db(database.as_str());
        }
        let settings = builder
            .build()
            .map_err(|e| Neo4jError::Config(e.to_string()))?;

        debug!("Connecting to {}", config);
        let client = Self {
            graph: Arc::new(Graph::connect(settings).await?),
        };
        client.ensure_schema().await?;
        Ok(client)
    }

    async fn ensure_schema(&self) -> Result<(), Neo4jError> {
        for &(name, statement) in SCHEMA {
            self.graph
                .run(Query::new(statement.to_string()))
                .await
                .map_err(|source| Neo4jError::Schema { name, source })?;
        }
        Ok(())
    }

    pub(super) fn graph(&self) -> &Graph {
        &self.graph
    }
}
