//! Catalog model types

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a device uses a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConformanceType {
    Implement,
    Import,
}

impl std::fmt::Display for ConformanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Implement => "implement",
            Self::Import => "import",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ConformanceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "implement" => Ok(Self::Implement),
            "import" => Ok(Self::Import),
            other => Err(format!("unknown conformance type `{other}`")),
        }
    }
}

/// Whether a schema file holds a module or a submodule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    Module,
    Submodule,
}

impl std::fmt::Display for ModuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Submodule => write!(f, "submodule"),
        }
    }
}

/// Edge reference to a module that may not be resolved yet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    pub name: String,
    pub revision: Option<String>,
}

impl ModuleRef {
    #[must_use]
    pub fn new(name: impl Into<String>, revision: Option<&str>) -> Self {
        Self {
            name: name.into(),
            revision: revision.map(str::to_string),
        }
    }
}

/// A deviation module applied by a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviationRef {
    pub name: String,
    pub revision: Option<String>,
}

impl DeviationRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: None,
        }
    }
}

/// Everything learned about one resolved schema module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    pub revision: String,
    pub organization: String,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub module_type: ModuleType,
    pub belongs_to: Option<String>,
    pub yang_version: String,
    /// `oc-ext:openconfig-version`, when declared
    pub semantic_version: Option<String>,
    pub schema_url: Option<String>,
    pub conformance_type: Option<ConformanceType>,
    pub submodules: Vec<ModuleRef>,
    pub imports: Vec<ModuleRef>,
    pub features: Vec<String>,
    pub deviations: Vec<DeviationRef>,
    /// Location of the schema file on disk
    pub path: PathBuf,
    /// SHA-256 of the schema file contents
    pub content_hash: String,
}

impl ModuleDescriptor {
    /// The catalog key of this module
    #[must_use]
    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(&self.name, &self.revision, &self.organization)
    }

    /// Submodule edges followed by import edges, in document order
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKind, &ModuleRef)> {
        self.submodules
            .iter()
            .map(|r| (EdgeKind::Include, r))
            .chain(self.imports.iter().map(|r| (EdgeKind::Import, r)))
    }
}

/// Kind of dependency edge between modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    Include,
    Import,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Include => "INCLUDES",
            Self::Import => "IMPORTS",
        };
        write!(f, "{s}")
    }
}

/// `name@revision/organization`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogKey {
    pub name: String,
    pub revision: String,
    pub organization: String,
}

impl CatalogKey {
    #[must_use]
    pub fn new(name: &str, revision: &str, organization: &str) -> Self {
        Self {
            name: name.to_string(),
            revision: revision.to_string(),
            organization: organization.to_string(),
        }
    }
}

impl std::fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}/{}", self.name, self.revision, self.organization)
    }
}

impl FromStr for CatalogKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = s
            .split_once('@')
            .ok_or_else(|| format!("missing `@` in catalog key `{s}`"))?;
        let (revision, organization) = rest
            .split_once('/')
            .ok_or_else(|| format!("missing `/` in catalog key `{s}`"))?;
        Ok(Self::new(name, revision, organization))
    }
}

/// Vendor/platform annotation attached to a module for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementation {
    pub vendor: String,
    pub platform: String,
    pub software_version: String,
    pub software_flavor: String,
    pub os_version: String,
    pub os_type: String,
    pub feature_set: String,
    pub features: Vec<String>,
    pub deviations: Vec<DeviationRef>,
    pub conformance_type: Option<ConformanceType>,
    pub capabilities: Vec<String>,
    pub netconf_versions: Vec<String>,
}

/// One entry handed to a catalog store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub key: CatalogKey,
    pub module: ModuleDescriptor,
    /// Empty for SDO modules ingested without a device
    pub implementations: Vec<Implementation>,
}
