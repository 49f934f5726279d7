//! Locator module: Schema file search across ordered roots
//!
//! A module is looked up by file name (`name@revision.yang` or
//! `name.yang`) in an ordered list of root directories. Traversal is
//! sorted by file name so that "first match wins" is reproducible.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Searches an ordered list of root directories for schema files
#[derive(Debug, Clone, Default)]
pub struct ModuleLocator {
    roots: Vec<PathBuf>,
}

impl ModuleLocator {
    /// Create a locator over the given roots, highest priority first
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a lower-priority root
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// The roots in search order
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Find the schema file for a module
    ///
    /// The first pass looks for a revisioned file name in every root
    /// (`name@revision.yang`, or any `name@*.yang` without a revision).
    /// Only if that finds nothing does the second pass look for the bare
    /// `name.yang`. A revisioned match in any root therefore beats a bare
    /// match in an earlier root.
    ///
    /// Without a revision, the root that holds any `name@*.yang` supplies
    /// its latest revision. Revision dates compare as strings.
    #[must_use]
    pub fn locate(&self, name: &str, revision: Option<&str>) -> Option<PathBuf> {
        let revisioned = FilePattern::Revisioned { name, revision };
        let bare = FilePattern::Bare { name };

        let found = self
            .find_first(&revisioned)
            .or_else(|| self.find_first(&bare));

        match &found {
            Some(path) => debug!("Located {} at {}", name, path.display()),
            None => debug!("Module {} not found in {} roots", name, self.roots.len()),
        }
        found
    }

    fn find_first(&self, pattern: &FilePattern<'_>) -> Option<PathBuf> {
        self.roots
            .iter()
            .find_map(|root| find_in_root(root, pattern))
    }
}

/// File name shapes the locator accepts
enum FilePattern<'a> {
    Revisioned {
        name: &'a str,
        revision: Option<&'a str>,
    },
    Bare {
        name: &'a str,
    },
}

impl FilePattern<'_> {
    fn matches(&self, file_name: &str) -> bool {
        let Some(stem) = file_name.strip_suffix(".yang") else {
            return false;
        };
        match self {
            Self::Revisioned {
                name,
                revision: Some(revision),
            } => stem
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('@'))
                .is_some_and(|rest| rest == *revision),
            Self::Revisioned {
                name,
                revision: None,
            } => stem
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('@'))
                .is_some_and(|rest| !rest.is_empty()),
            Self::Bare { name } => stem == *name,
        }
    }

    fn wants_latest(&self) -> bool {
        matches!(self, Self::Revisioned { revision: None, .. })
    }
}

fn find_in_root(root: &Path, pattern: &FilePattern<'_>) -> Option<PathBuf> {
    let mut matches = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_str().is_some_and(|n| pattern.matches(n)))
        .map(walkdir::DirEntry::into_path);

    if !pattern.wants_latest() {
        return matches.next();
    }

    // Ties keep the earlier file in traversal order
    matches.fold(None, |latest, path| {
        let newer = latest
            .as_ref()
            .map_or(true, |current| file_revision(&path) > file_revision(current));
        if newer {
            Some(path)
        } else {
            latest
        }
    })
}

/// The part after `@` in a `name@revision.yang` file name
fn file_revision(path: &Path) -> Option<&str> {
    path.file_stem()?
        .to_str()?
        .split_once('@')
        .map(|(_, revision)| revision)
}
