//! Catalog lookups: module search, vendor listings, dependencies, statistics

use neo4rs::Query;

use super::Neo4jClient;
use crate::graph::neo4j::Neo4jError;

/// A module with the number of implementations attached to it
#[derive(Debug, Clone)]
pub struct ModuleResult {
    pub key: String,
    pub name: String,
    pub revision: String,
    pub organization: String,
    pub module_type: String,
    pub implementation_count: i64,
}

/// A module as implemented on one vendor platform
#[derive(Debug, Clone)]
pub struct ImplementationResult {
    pub key: String,
    pub platform: String,
    pub software_version: String,
    pub os_type: String,
    pub conformance_type: String,
}

/// A dependency edge leaving a module
#[derive(Debug, Clone)]
pub struct DependencyResult {
    /// `IMPORTS` or `INCLUDES`
    pub kind: String,
    pub key: String,
}

impl Neo4jClient {
    /// Find modules by name pattern (case-insensitive contains)
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_modules(&self, pattern: &str) -> Result<Vec<ModuleResult>, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (m:Module)
            WHERE toLower(m.name) CONTAINS toLower($pattern)
            OPTIONAL MATCH (i:Implementation)-[:IMPLEMENTS]->(m)
            RETURN m.key, m.name, m.revision, m.organization, m.module_type, count(i) as implementation_count
            ORDER BY m.name, m.revision
            LIMIT 100
            "#
            .to_string(),
        )
        .param("pattern", pattern);

        let mut result = self.graph().execute(query).await?;
        let mut modules = Vec::new();

        while let Some(row) = result.next().await? {
            modules.push(ModuleResult {
                key: row.get("m.key").unwrap_or_default(),
                name: row.get("m.name").unwrap_or_default(),
                revision: row.get("m.revision").unwrap_or_default(),
                organization: row.get("m.organization").unwrap_or_default(),
                module_type: row.get("m.module_type").unwrap_or_default(),
                implementation_count: row.get("implementation_count").unwrap_or(0),
            });
        }

        Ok(modules)
    }

    /// Modules implemented by a vendor, optionally on one platform
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn modules_by_vendor(
        &self,
        vendor: &str,
        platform: Option<&str>,
    ) -> Result<Vec<ImplementationResult>, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (i:Implementation)-[:IMPLEMENTS]->(m:Module)
            WHERE i.vendor = $vendor AND ($platform = '' OR i.platform = $platform)
            RETURN DISTINCT m.key, i.platform, i.software_version, i.os_type, i.conformance_type
            ORDER BY i.platform, i.software_version, m.key
            LIMIT 500
            "#
            .to_string(),
        )
        .param("vendor", vendor)
        .param("platform", platform.unwrap_or_default());

        let mut result = self.graph().execute(query).await?;
        let mut implementations = Vec::new();

        while let Some(row) = result.next().await? {
            implementations.push(ImplementationResult {
                key: row.get("m.key").unwrap_or_default(),
                platform: row.get("i.platform").unwrap_or_default(),
                software_version: row.get("i.software_version").unwrap_or_default(),
                os_type: row.get("i.os_type").unwrap_or_default(),
                conformance_type: row.get("i.conformance_type").unwrap_or_default(),
            });
        }

        Ok(implementations)
    }

    /// Direct dependencies of the module with the given catalog key
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn dependencies_of(&self, key: &str) -> Result<Vec<DependencyResult>, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (m:Module {key: $key})-[r:IMPORTS|INCLUDES]->(t:Module)
            RETURN type(r) as kind, t.key
            ORDER BY kind DESC, t.key
            "#
            .to_string(),
        )
        .param("key", key);

        let mut result = self.graph().execute(query).await?;
        let mut dependencies = Vec::new();

        while let Some(row) = result.next().await? {
            dependencies.push(DependencyResult {
                kind: row.get("kind").unwrap_or_default(),
                key: row.get("t.key").unwrap_or_default(),
            });
        }

        Ok(dependencies)
    }

    /// Node and edge counts of the catalog graph
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn stats(&self) -> Result<GraphStats, Neo4jError> {
        let query = Query::new(
            r#"
            OPTIONAL MATCH (m:Module)
            WITH count(m) AS modules
            OPTIONAL MATCH (i:Implementation)
            WITH modules, count(i) AS implementations, count(DISTINCT i.vendor) AS vendors
            OPTIONAL MATCH (r:CatalogRun)
            WITH modules, implementations, vendors, count(r) AS catalog_runs
            OPTIONAL MATCH (:Module)-[imp:IMPORTS]->(:Module)
            WITH modules, implementations, vendors, catalog_runs, count(imp) AS imports
            OPTIONAL MATCH (:Module)-[inc:INCLUDES]->(:Module)
            WITH modules, implementations, vendors, catalog_runs, imports, count(inc) AS includes
            OPTIONAL MATCH (:Implementation)-[impl:IMPLEMENTS]->(:Module)
            RETURN modules, implementations, vendors, catalog_runs, imports, includes,
                   count(impl) AS implements
            "#
            .to_string(),
        );

        let mut result = self.graph().execute(query).await?;
        let Some(row) = result.next().await? else {
            return Ok(GraphStats::default());
        };
        let count = |column: &str| row.get::<i64>(column).unwrap_or(0);

        Ok(GraphStats {
            modules: count("modules"),
            implementations: count("implementations"),
            vendors: count("vendors"),
            catalog_runs: count("catalog_runs"),
            imports: count("imports"),
            includes: count("includes"),
            implements: count("implements"),
        })
    }
}

/// Graph statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GraphStats {
    pub modules: i64,
    pub implementations: i64,
    /// Distinct vendors across all implementations
    pub vendors: i64,
    pub catalog_runs: i64,
    pub imports: i64,
    pub includes: i64,
    pub implements: i64,
}
