//! Platform metadata (`platform-metadata.json`)

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::CapabilityError;

/// Contents of a `platform-metadata.json` file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformMetadata {
    pub platforms: Platforms,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Platforms {
    #[serde(default)]
    pub platform: Vec<Platform>,
}

/// One platform entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Platform {
    /// Platform name, e.g. `ncs5500`
    pub name: String,
    pub vendor: String,
    pub software_version: String,
    #[serde(default)]
    pub software_flavor: Option<String>,
    pub os_type: String,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub feature_set: Option<String>,
    pub module_list_file: ModuleListFile,
    #[serde(default)]
    pub netconf_capabilities: Vec<String>,
}

/// Where the platform's capability file lives upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleListFile {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub owner: String,
    pub repository: String,
    pub path: String,
    #[serde(default)]
    pub branch: Option<String>,
}

impl ModuleListFile {
    /// Repository name without a `.git` style suffix
    #[must_use]
    pub fn repository_name(&self) -> &str {
        self.repository
            .split('.')
            .next()
            .unwrap_or(&self.repository)
    }
}

impl PlatformMetadata {
    /// Read a metadata file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid metadata.
    pub fn from_file(path: &Path) -> Result<Self, CapabilityError> {
        let text = std::fs::read_to_string(path).map_err(|source| CapabilityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CapabilityError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `platform-metadata.json` next to a capability file, if present
    ///
    /// # Errors
    /// Returns an error if the metadata file exists but cannot be parsed.
    pub fn beside(capability_file: &Path) -> Result<Option<Self>, CapabilityError> {
        let Some(dir) = capability_file.parent() else {
            return Ok(None);
        };
        let path = dir.join("platform-metadata.json");
        if !path.is_file() {
            return Ok(None);
        }
        Self::from_file(&path).map(Some)
    }

    /// Platforms whose `module-list-file` path refers to the given file
    pub fn platforms_for<'a>(
        &'a self,
        capability_file: &'a Path,
    ) -> impl Iterator<Item = &'a Platform> + 'a {
        let file = capability_file.to_string_lossy().into_owned();
        self.platforms
            .platform
            .iter()
            .filter(move |p| {
                let path = p.module_list_file.path.as_str();
                !path.is_empty() && file.contains(path)
            })
    }

    /// Combined `netconf-capabilities` of the matching platforms, duplicates
    /// removed
    #[must_use]
    pub fn capabilities_for(&self, capability_file: &Path) -> Vec<String> {
        let mut capabilities: Vec<String> = Vec::new();
        for platform in self.platforms_for(capability_file) {
            for capability in &platform.netconf_capabilities {
                if !capabilities.contains(capability) {
                    capabilities.push(capability.clone());
                }
            }
        }
        capabilities
    }
}
