//! Directory walking

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::CapabilityFormat;

/// Marker of duplicated downloads that SDO ingestion skips
const DUPLICATE_MARKER: &str = "[1]";

/// A capability document found while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub format: CapabilityFormat,
}

/// Walks a directory tree in file name order
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Capability documents below the root
    pub fn capability_files(&self) -> impl Iterator<Item = DiscoveredFile> {
        self.files().filter_map(|path| {
            let format = CapabilityFormat::from_path(&path)?;
            debug!("Found {} document {}", format, path.display());
            Some(DiscoveredFile { path, format })
        })
    }

    /// `.yang` files below the root, skipping duplicated downloads
    pub fn schema_files(&self) -> impl Iterator<Item = PathBuf> {
        self.files().filter(|path| {
            let is_yang = path.extension().is_some_and(|ext| ext == "yang");
            let is_duplicate = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().contains(DUPLICATE_MARKER));
            is_yang && !is_duplicate
        })
    }

    fn files(&self) -> impl Iterator<Item = PathBuf> {
        WalkBuilder::new(&self.root)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(ignore::DirEntry::into_path)
    }
}

/// SHA-256 of a file's contents as lowercase hex
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn compute_file_hash(path: &Path) -> std::io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
