//! Catalog write queries

use neo4rs::Query;
use tracing::debug;

use super::Neo4jClient;
use crate::catalog::model::{CatalogRecord, DeviationRef, Implementation};
use crate::graph::neo4j::Neo4jError;
use crate::version::CatalogRun;

impl Neo4jClient {
    /// Create a catalog run node
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn create_catalog_run(&self, run: &CatalogRun) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            CREATE (r:CatalogRun {
                id: $id,
                source_path: $source_path,
                commit_sha: $commit_sha,
                branch: $branch,
                schema_repository: $schema_repository,
                started_at: datetime($started_at),
                version: $version
            })
            "#
            .to_string(),
        )
        .param("id", run.id.clone())
        .param("source_path", run.source_path.clone())
        .param("commit_sha", run.commit_sha.clone().unwrap_or_default())
        .param("branch", run.branch.clone().unwrap_or_default())
        .param(
            "schema_repository",
            run.schema_repository.clone().unwrap_or_default(),
        )
        .param("started_at", run.started_at.to_rfc3339())
        .param("version", run.version.clone().unwrap_or_default());

        self.graph().run(query).await?;
        Ok(())
    }

    /// Store the completion time and counts of a finished run
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn finish_catalog_run(&self, run: &CatalogRun) -> Result<(), Neo4jError> {
        let Some(finished_at) = run.finished_at else {
            debug!("Run {} is not finished, nothing to store", run.id);
            return Ok(());
        };
        let query = Query::new(
            r#"
            MATCH (r:CatalogRun {id: $id})
            SET r.finished_at = datetime($finished_at),
                r.device_count = $device_count,
                r.record_count = $record_count
            "#
            .to_string(),
        )
        .param("id", run.id.clone())
        .param("finished_at", finished_at.to_rfc3339())
        .param("device_count", count_param(run.device_count))
        .param("record_count", count_param(run.record_count));

        self.graph().run(query).await?;
        Ok(())
    }

    /// Write records and then the dependency edges between them
    ///
    /// Module nodes are merged by catalog key. Every implementation becomes
    /// a new node linked to its module and to the run, so appending the same
    /// key twice keeps both annotations. Returns the number of records.
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn insert_records(
        &self,
        run_id: &str,
        records: &[CatalogRecord],
    ) -> Result<usize, Neo4jError> {
        for record in records {
            self.merge_module(record).await?;
            for implementation in &record.implementations {
                self.create_implementation(run_id, &record.key.to_string(), implementation)
                    .await?;
            }
        }
        for record in records {
            self.link_dependencies(record).await?;
        }
        debug!("Stored {} records for run {}", records.len(), run_id);
        Ok(records.len())
    }

    async fn merge_module(&self, record: &CatalogRecord) -> Result<(), Neo4jError> {
        let module = &record.module;
        let query = Query::new(
            r#"
            MERGE (m:Module {key: $key})
            ON CREATE SET
                m.name = $name,
                m.revision = $revision,
                m.organization = $organization,
                m.namespace = $namespace,
                m.prefix = $prefix,
                m.module_type = $module_type,
                m.belongs_to = $belongs_to,
                m.yang_version = $yang_version,
                m.semantic_version = $semantic_version,
                m.schema_url = $schema_url,
                m.content_hash = $content_hash
            "#
            .to_string(),
        )
        .param("key", record.key.to_string())
        .param("name", record.key.name.clone())
        .param("revision", record.key.revision.clone())
        .param("organization", record.key.organization.clone())
        .param("namespace", module.namespace.clone().unwrap_or_default())
        .param("prefix", module.prefix.clone().unwrap_or_default())
        .param("module_type", module.module_type.to_string())
        .param("belongs_to", module.belongs_to.clone().unwrap_or_default())
        .param("yang_version", module.yang_version.clone())
        .param(
            "semantic_version",
            module.semantic_version.clone().unwrap_or_default(),
        )
        .param("schema_url", module.schema_url.clone().unwrap_or_default())
        .param("content_hash", module.content_hash.clone());

        self.graph().run(query).await?;
        Ok(())
    }

    async fn create_implementation(
        &self,
        run_id: &str,
        key: &str,
        implementation: &Implementation,
    ) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (m:Module {key: $key})
            MATCH (r:CatalogRun {id: $run_id})
            CREATE (i:Implementation {
                vendor: $vendor,
                platform: $platform,
                software_version: $software_version,
                software_flavor: $software_flavor,
                os_version: $os_version,
                os_type: $os_type,
                feature_set: $feature_set,
                features: $features,
                deviations: $deviations,
                conformance_type: $conformance_type,
                capabilities: $capabilities,
                netconf_versions: $netconf_versions
            })
            CREATE (i)-[:IMPLEMENTS]->(m)
            CREATE (i)-[:IN_RUN]->(r)
            "#
            .to_string(),
        )
        .param("key", key)
        .param("run_id", run_id)
        .param("vendor", implementation.vendor.clone())
        .param("platform", implementation.platform.clone())
        .param("software_version", implementation.software_version.clone())
        .param("software_flavor", implementation.software_flavor.clone())
        .param("os_version", implementation.os_version.clone())
        .param("os_type", implementation.os_type.clone())
        .param("feature_set", implementation.feature_set.clone())
        .param("features", implementation.features.clone())
        .param("deviations", deviation_keys(&implementation.deviations))
        .param(
            "conformance_type",
            implementation
                .conformance_type
                .map(|c| c.to_string())
                .unwrap_or_default(),
        )
        .param("capabilities", implementation.capabilities.clone())
        .param("netconf_versions", implementation.netconf_versions.clone());

        self.graph().run(query).await?;
        Ok(())
    }

    /// Link a module to the stored modules it includes or imports
    ///
    /// Targets are matched by name, and by revision when the edge pins one.
    async fn link_dependencies(&self, record: &CatalogRecord) -> Result<(), Neo4jError> {
        for (kind, reference) in record.module.edges() {
            // relationship types cannot be parameters; `kind` is a closed enum
            let query = Query::new(format!(
                r#"
                MATCH (m:Module {{key: $key}})
                MATCH (t:Module {{name: $target}})
                WHERE $revision = '' OR t.revision = $revision
                MERGE (m)-[:{kind}]->(t)
                "#
            ))
            .param("key", record.key.to_string())
            .param("target", reference.name.clone())
            .param("revision", reference.revision.clone().unwrap_or_default());

            self.graph().run(query).await?;
        }
        Ok(())
    }
}

fn deviation_keys(deviations: &[DeviationRef]) -> Vec<String> {
    deviations
        .iter()
        .map(|d| match &d.revision {
            Some(revision) => format!("{}@{}", d.name, revision),
            None => d.name.clone(),
        })
        .collect()
}

fn count_param(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
