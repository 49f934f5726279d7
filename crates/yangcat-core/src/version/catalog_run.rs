//! Catalog run identity and bookkeeping

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::platform::SchemaSource;

/// One ingestion run over a vendor or SDO tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRun {
    pub id: String,
    /// Directory that was ingested
    pub source_path: String,
    pub commit_sha: Option<String>,
    pub branch: Option<String>,
    /// `owner/repository` the schema URLs of this run point into
    pub schema_repository: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// User-provided version tag
    pub version: Option<String>,
    pub device_count: usize,
    pub record_count: usize,
}

impl CatalogRun {
    #[must_use]
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_path: source_path.into(),
            commit_sha: None,
            branch: None,
            schema_repository: None,
            started_at: Utc::now(),
            finished_at: None,
            version: None,
            device_count: 0,
            record_count: 0,
        }
    }

    #[must_use]
    pub fn with_commit(mut self, sha: impl Into<String>) -> Self {
        self.commit_sha = Some(sha.into());
        self
    }

    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Record the repository and revision schema URLs were built from
    ///
    /// The source revision takes the place of the commit when the ingested
    /// directory is not itself a checkout.
    #[must_use]
    pub fn with_schema_source(mut self, source: &SchemaSource) -> Self {
        self.schema_repository = Some(format!("{}/{}", source.owner, source.repository));
        if self.commit_sha.is_none() {
            self.commit_sha = Some(source.revision.clone());
        }
        self
    }

    /// Fill in commit and branch from the checkout containing the source
    /// path. Leaves them unset outside a repository or on an unborn HEAD.
    #[must_use]
    pub fn with_git_info(mut self) -> Self {
        let Ok(repo) = git2::Repository::discover(Path::new(&self.source_path)) else {
            return self;
        };
        let Ok(head) = repo.head() else {
            return self;
        };
        self.commit_sha = head.target().map(|oid| oid.to_string()).or(self.commit_sha);
        self.branch = head.shorthand().map(str::to_string).or(self.branch);
        self
    }

    /// Mark the run complete with what it produced
    #[must_use]
    pub fn finish(mut self, device_count: usize, record_count: usize) -> Self {
        self.device_count = device_count;
        self.record_count = record_count;
        self.finished_at = Some(Utc::now());
        self
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}
