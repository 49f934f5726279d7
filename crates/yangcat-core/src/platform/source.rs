//! Schema URL sources and git checkout discovery

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capability::ModuleListFile;

/// Host serving raw repository contents
pub const DEFAULT_RAW_HOST: &str = "https://raw.githubusercontent.com";

const DEFAULT_BRANCH: &str = "master";

/// Errors that can occur while inspecting a local checkout
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository at {0} has no working directory")]
    Bare(PathBuf),

    #[error("Repository at {0} has no usable `origin` remote")]
    NoOrigin(PathBuf),
}

/// Maps files below a local checkout to raw content URLs
///
/// URLs have the shape `<raw-host>/<owner>/<repository>/<revision>/<path>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSource {
    pub raw_host: String,
    pub owner: String,
    pub repository: String,
    /// Branch name or commit hash
    pub revision: String,
    /// Local directory corresponding to the repository root
    pub local_root: PathBuf,
}

impl SchemaSource {
    /// Create a source on [`DEFAULT_RAW_HOST`]
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        revision: impl Into<String>,
        local_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            raw_host: DEFAULT_RAW_HOST.to_string(),
            owner: owner.into(),
            repository: repository.into(),
            revision: revision.into(),
            local_root: local_root.into(),
        }
    }

    /// Use a different raw content host
    #[must_use]
    pub fn with_raw_host(mut self, raw_host: impl Into<String>) -> Self {
        self.raw_host = raw_host.into().trim_end_matches('/').to_string();
        self
    }

    /// Pin the source to a branch or commit
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Source described by a metadata `module-list-file` entry
    ///
    /// The local root is the capability file path with the entry's
    /// repository-relative path removed from its end. Returns `None` if the
    /// capability file does not end with that path.
    #[must_use]
    pub fn from_module_list_file(entry: &ModuleListFile, capability_file: &Path) -> Option<Self> {
        let relative = Path::new(entry.path.trim_start_matches('/'));
        let relative_len = relative.components().count();
        if relative_len == 0 || !capability_file.ends_with(relative) {
            return None;
        }

        let mut local_root = capability_file.to_path_buf();
        for _ in 0..relative_len {
            local_root.pop();
        }
        let revision = entry
            .branch
            .clone()
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        Some(Self::new(
            &entry.owner,
            entry.repository_name(),
            revision,
            local_root,
        ))
    }

    /// Source for a local git checkout, pinned to its HEAD commit
    ///
    /// Owner and repository name come from the `origin` remote URL.
    ///
    /// # Errors
    /// Returns an error if `path` is not inside a non-bare git repository
    /// with an `origin` remote.
    pub fn from_checkout(path: &Path) -> Result<Self, RepoError> {
        let repo = git2::Repository::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| RepoError::Bare(path.to_path_buf()))?
            .to_path_buf();

        let remote = repo.find_remote("origin")?;
        let (owner, repository) = remote
            .url()
            .and_then(owner_and_repository)
            .ok_or_else(|| RepoError::NoOrigin(workdir.clone()))?;

        let revision = repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .map_or_else(|| DEFAULT_BRANCH.to_string(), |oid| oid.to_string());

        Ok(Self::new(owner, repository, revision, workdir))
    }

    /// Raw URL of `file`, if it lies below the local root
    #[must_use]
    pub fn url_for(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.local_root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}/{}/{}/{}",
            self.raw_host,
            self.owner,
            self.repository,
            self.revision,
            segments.join("/")
        ))
    }
}

/// `(owner, repository)` from an https or scp-style remote URL
fn owner_and_repository(url: &str) -> Option<(String, String)> {
    let path = url
        .trim_end_matches('/')
        .trim_end_matches(".git")
        .rsplitn(3, ['/', ':'])
        .take(2)
        .collect::<Vec<_>>();
    match path.as_slice() {
        [repository, owner] if !repository.is_empty() && !owner.is_empty() => {
            Some(((*owner).to_string(), (*repository).to_string()))
        }
        _ => None,
    }
}
