//! Platform module: Device and vendor context
//!
//! A [`DeviceContext`] carries everything the catalog needs to annotate the
//! modules of one capability file: vendor, OS, software version, the
//! platforms sharing the file, advertised capabilities, and the
//! [`SchemaSource`]s used to turn local paths into schema URLs.

mod source;

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::capability::{CapabilitySet, Platform};

pub use source::{RepoError, SchemaSource, DEFAULT_RAW_HOST};

const UNKNOWN: &str = "Unknown";
const ALL: &str = "ALL";

/// A platform sharing a capability file, with its software flavor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFlavor {
    pub platform: String,
    pub software_flavor: String,
}

/// Vendor and platform context of one capability file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceContext {
    /// Path of the capability file, used to key integrity gaps
    pub device_path: String,
    pub vendor: String,
    pub os_type: String,
    pub os_version: String,
    pub software_version: String,
    pub feature_set: String,
    pub platforms: Vec<PlatformFlavor>,
    pub capabilities: Vec<String>,
    pub netconf_versions: Vec<String>,
    pub schema_sources: Vec<SchemaSource>,
}

impl DeviceContext {
    /// Context with the given vendor and everything else unknown
    #[must_use]
    pub fn new(device_path: &Path, vendor: impl Into<String>) -> Self {
        Self {
            device_path: device_path.display().to_string(),
            vendor: vendor.into(),
            os_type: UNKNOWN.to_string(),
            os_version: UNKNOWN.to_string(),
            software_version: UNKNOWN.to_string(),
            feature_set: ALL.to_string(),
            platforms: Vec::new(),
            capabilities: Vec::new(),
            netconf_versions: Vec::new(),
            schema_sources: Vec::new(),
        }
    }

    /// Context from the platform-metadata entries matching a capability file
    ///
    /// Vendor and software details come from the last matching entry; every
    /// matching entry contributes a platform. Returns `None` if no entry
    /// matches.
    #[must_use]
    pub fn from_metadata<'a, I>(capability_file: &Path, platforms: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Platform>,
    {
        let mut context: Option<Self> = None;
        for platform in platforms {
            let ctx = context.get_or_insert_with(|| Self::new(capability_file, &platform.vendor));
            ctx.vendor.clone_from(&platform.vendor);
            ctx.os_type.clone_from(&platform.os_type);
            ctx.software_version.clone_from(&platform.software_version);
            ctx.os_version = platform
                .os_version
                .clone()
                .unwrap_or_else(|| platform.software_version.clone());
            ctx.feature_set = platform
                .feature_set
                .clone()
                .unwrap_or_else(|| ALL.to_string());
            ctx.platforms.push(PlatformFlavor {
                platform: platform.name.clone(),
                software_flavor: platform
                    .software_flavor
                    .clone()
                    .unwrap_or_else(|| ALL.to_string()),
            });
            if let Some(source) =
                SchemaSource::from_module_list_file(&platform.module_list_file, capability_file)
            {
                if !ctx.schema_sources.contains(&source) {
                    ctx.schema_sources.push(source);
                }
            }
        }
        context
    }

    /// Context derived from a `<vendor>/<os>/<version>/<file>` layout below
    /// `vendor_root`
    #[must_use]
    pub fn from_layout(capability_file: &Path, vendor_root: &Path) -> Self {
        let relative = capability_file
            .strip_prefix(vendor_root)
            .unwrap_or(capability_file);
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let part = |index: usize| parts.get(index).map(String::as_str);

        let mut context = Self::new(capability_file, part(0).unwrap_or(UNKNOWN));
        let os_type = os_type_from_dir(part(1).unwrap_or_default());
        let platform = part(3)
            .map(|name| name.split('.').next().unwrap_or(name))
            .and_then(|stem| platform_from_stem(os_type, stem))
            .unwrap_or(UNKNOWN);

        context.os_type = os_type.to_string();
        if let Some(version) = part(2) {
            context.software_version = version.to_string();
            context.os_version = version.to_string();
        }
        context.platforms.push(PlatformFlavor {
            platform: platform.to_string(),
            software_flavor: ALL.to_string(),
        });
        context
    }

    /// Record the advertised capability and netconf-version lists
    #[must_use]
    pub fn with_capabilities(mut self, capability_set: &CapabilitySet) -> Self {
        self.capabilities.clone_from(&capability_set.capabilities);
        self.netconf_versions
            .clone_from(&capability_set.netconf_versions);
        self
    }

    /// Add a lower-priority schema source
    #[must_use]
    pub fn with_schema_source(mut self, source: SchemaSource) -> Self {
        self.schema_sources.push(source);
        self
    }

    /// Schema URL of a local file, from the first source that contains it
    #[must_use]
    pub fn schema_url(&self, file: &Path) -> Option<String> {
        self.schema_sources.iter().find_map(|s| s.url_for(file))
    }
}

fn os_type_from_dir(os_dir: &str) -> &'static str {
    let os_dir = os_dir.to_lowercase();
    if os_dir.contains("nx") {
        "NX-OS"
    } else if os_dir.contains("xe") {
        "IOS-XE"
    } else if os_dir.contains("xr") {
        "IOS-XR"
    } else {
        UNKNOWN
    }
}

fn platform_from_stem<'a>(os_type: &str, stem: &'a str) -> Option<&'a str> {
    let mut segments = stem.split('-');
    match os_type {
        "NX-OS" | "IOS-XE" => segments.next(),
        "IOS-XR" => segments.nth(1),
        _ => None,
    }
    .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests;
