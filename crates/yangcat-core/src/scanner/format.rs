//! Capability document kinds

use std::path::Path;

/// Kind of capability document, judged from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityFormat {
    /// NETCONF hello message (`*capabilit*.xml`)
    Hello,
    /// YANG-Library document (`*yang-library*.xml`)
    YangLibrary,
}

impl CapabilityFormat {
    /// Detect the format from a file name
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        let stem = name.strip_suffix(".xml")?;
        if stem.contains("yang-library") {
            Some(Self::YangLibrary)
        } else if stem.contains("capabilit") {
            Some(Self::Hello)
        } else {
            None
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::YangLibrary => "yang-library",
        }
    }
}

impl std::fmt::Display for CapabilityFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
