//! Capability module: Normalizing device capability descriptors
//!
//! A device advertises its modules in one of three shapes: a NETCONF hello
//! message, a YANG-Library document, or a platform-metadata JSON file with
//! an explicit `netconf-capabilities` list. All of them are reduced to a
//! [`CapabilitySet`].

mod hello;
mod metadata;
mod uri;
mod yang_library;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::model::{ConformanceType, DeviationRef};

pub use hello::parse_hello;
pub use metadata::{ModuleListFile, Platform, PlatformMetadata, Platforms};
pub use uri::{classify_capabilities, parse_capability_uri};
pub use yang_library::parse_yang_library;

/// Errors that can occur while reading capability descriptors
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Malformed platform metadata {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unrecognized capability document with root element `{0}`")]
    UnknownDocument(String),
}

/// One module advertised by a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityEntry {
    pub module_name: String,
    pub revision: Option<String>,
    pub features: Vec<String>,
    pub deviations: Vec<DeviationRef>,
    /// Explicit conformance from a YANG-Library document
    pub conformance_type: Option<ConformanceType>,
}

impl CapabilityEntry {
    /// Create an entry with no revision, features or deviations
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            revision: None,
            features: Vec::new(),
            deviations: Vec::new(),
            conformance_type: None,
        }
    }

    /// Set the revision
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }
}

/// A parsed capability document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityDocument {
    /// Raw `<capability>` texts of a NETCONF hello message
    Hello(Vec<String>),
    /// Modules listed by a YANG-Library document
    YangLibrary(Vec<CapabilityEntry>),
}

impl CapabilityDocument {
    /// Read a capability XML file, detecting its shape from the root element
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is neither a hello
    /// message nor a YANG-Library document.
    pub fn from_file(path: &Path) -> Result<Self, CapabilityError> {
        let xml = std::fs::read_to_string(path).map_err(|source| CapabilityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_xml(&xml)
    }

    /// Parse capability XML text
    ///
    /// # Errors
    /// Returns an error if the XML is malformed or of an unknown shape.
    pub fn from_xml(xml: &str) -> Result<Self, CapabilityError> {
        let xml = hello::repair_ampersands(xml);
        let document = roxmltree::Document::parse(&xml)?;
        let root = document.root_element();

        if root.tag_name().name() == "hello" {
            return Ok(Self::Hello(parse_hello(&document)));
        }
        if yang_library::is_yang_library(&document) {
            return Ok(Self::YangLibrary(parse_yang_library(&document)));
        }
        Err(CapabilityError::UnknownDocument(
            root.tag_name().name().to_string(),
        ))
    }
}

/// Normalized capability information for one device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Modules to resolve, in advertisement order
    pub entries: Vec<CapabilityEntry>,
    /// Non-module capability URIs, query suffix stripped
    pub capabilities: Vec<String>,
    /// NETCONF base protocol URIs
    pub netconf_versions: Vec<String>,
}

/// Combines a capability document with platform metadata
#[derive(Debug, Clone, Default)]
pub struct CapabilitySource {
    document: Option<CapabilityDocument>,
    metadata_capabilities: Vec<String>,
}

impl CapabilitySource {
    /// Source backed by a parsed capability document
    #[must_use]
    pub fn from_document(document: CapabilityDocument) -> Self {
        Self {
            document: Some(document),
            metadata_capabilities: Vec::new(),
        }
    }

    /// Source backed only by pre-extracted metadata capability URIs
    #[must_use]
    pub fn from_metadata(capabilities: Vec<String>) -> Self {
        Self {
            document: None,
            metadata_capabilities: capabilities,
        }
    }

    /// Attach the `netconf-capabilities` list from platform metadata
    #[must_use]
    pub fn with_metadata_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.metadata_capabilities = capabilities;
        self
    }

    /// Load a capability file and the capabilities its platform metadata
    /// declares for it
    ///
    /// # Errors
    /// Returns an error if the capability file cannot be read or parsed.
    pub fn load(
        capability_file: &Path,
        metadata: Option<&PlatformMetadata>,
    ) -> Result<Self, CapabilityError> {
        let document = CapabilityDocument::from_file(capability_file)?;
        let capabilities = metadata
            .map(|m| m.capabilities_for(capability_file))
            .unwrap_or_default();
        Ok(Self::from_document(document).with_metadata_capabilities(capabilities))
    }

    /// Reduce the inputs to a [`CapabilitySet`]
    ///
    /// A non-empty metadata capability list is authoritative for the
    /// capability and netconf-version lists; hello tags are then only used
    /// to find the advertised modules.
    #[must_use]
    pub fn normalize(&self) -> CapabilitySet {
        let (capabilities, netconf_versions) = if !self.metadata_capabilities.is_empty() {
            debug!("Using capabilities from platform metadata");
            classify_capabilities(&self.metadata_capabilities)
        } else if let Some(CapabilityDocument::Hello(uris)) = &self.document {
            debug!("Using capabilities from hello message");
            classify_capabilities(uris)
        } else {
            (Vec::new(), Vec::new())
        };

        let entries = match &self.document {
            Some(CapabilityDocument::Hello(uris)) => {
                uris.iter().filter_map(|u| parse_capability_uri(u)).collect()
            }
            Some(CapabilityDocument::YangLibrary(entries)) => entries.clone(),
            None => self
                .metadata_capabilities
                .iter()
                .filter_map(|u| parse_capability_uri(u))
                .collect(),
        };

        CapabilitySet {
            entries,
            capabilities,
            netconf_versions,
        }
    }
}

#[cfg(test)]
mod tests;
