//! Organization module: Best-effort owner classification
//!
//! Decision order:
//! 1. a vendor keyword inside the `organization` statement
//! 2. the namespace against [`NAMESPACE_ORGANIZATIONS`], then against the
//!    vendor keywords
//! 3. the segment after `urn:` in the namespace
//! 4. for submodules, steps 2 and 3 on the parent module's namespace
//! 5. [`INDEPENDENT`]

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::locator::ModuleLocator;
use crate::parser::{Statement, StatementParser};

/// Organization assigned when nothing else matches
pub const INDEPENDENT: &str = "independent";

/// Keywords recognized in free-text organization statements
pub const VENDOR_KEYWORDS: &[&str] = &["cisco", "ietf"];

/// Namespace prefix to organization, first match wins
pub const NAMESPACE_ORGANIZATIONS: &[(&str, &str)] = &[
    ("http://cisco.com/", "cisco"),
    ("http://www.huawei.com/netconf", "huawei"),
    ("http://openconfig.net/yang", "openconfig"),
    ("http://tail-f.com/", "tail-f"),
    ("http://yang.juniper.net/", "juniper"),
];

/// Classifies the organization owning a module
pub struct OrganizationResolver<'p, P: StatementParser + ?Sized> {
    parser: &'p P,
    fallback_roots: Vec<PathBuf>,
}

impl<'p, P: StatementParser + ?Sized> OrganizationResolver<'p, P> {
    /// Create a resolver that parses parent modules with `parser`
    #[must_use]
    pub fn new(parser: &'p P) -> Self {
        Self {
            parser,
            fallback_roots: Vec::new(),
        }
    }

    /// Roots searched for a submodule's parent after its own directory and
    /// the directory above it
    #[must_use]
    pub fn with_fallback_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.fallback_roots = roots;
        self
    }

    /// Organization of the module parsed from `module_file`. Never fails.
    #[must_use]
    pub fn resolve(&self, module_file: &Path, module: &Statement) -> String {
        let namespace = self.resolve_namespace(module_file, module);
        classify_module(module, namespace.as_deref())
    }

    /// The module's own namespace, or its parent's for a submodule
    #[must_use]
    pub fn resolve_namespace(&self, module_file: &Path, module: &Statement) -> Option<String> {
        if let Some(namespace) = module.find_arg("namespace") {
            return Some(namespace.to_string());
        }
        if !module.is_submodule() {
            return None;
        }

        let parent_name = module.find_arg("belongs-to")?;
        let parent_file = self.locate_parent(module_file, parent_name)?;
        match self.parser.parse_file(&parent_file) {
            Ok(parent) => parent.find_arg("namespace").map(str::to_string),
            Err(e) => {
                debug!("Could not parse parent {}: {}", parent_file.display(), e);
                None
            }
        }
    }

    fn locate_parent(&self, module_file: &Path, parent_name: &str) -> Option<PathBuf> {
        let own_dir = module_file.parent()?;
        let mut roots = vec![own_dir.to_path_buf()];
        if let Some(above) = own_dir.parent() {
            roots.push(above.to_path_buf());
        }
        roots.extend(self.fallback_roots.iter().cloned());

        ModuleLocator::new(roots).locate(parent_name, None)
    }
}

/// Organization of `module` given its already resolved namespace
#[must_use]
pub fn classify_module(module: &Statement, namespace: Option<&str>) -> String {
    module
        .find_arg("organization")
        .and_then(vendor_keyword)
        .or_else(|| namespace.and_then(classify_namespace))
        .unwrap_or_else(|| INDEPENDENT.to_string())
}

/// Organization implied by a namespace URI (steps 2 and 3)
#[must_use]
pub fn classify_namespace(namespace: &str) -> Option<String> {
    if let Some((_, organization)) = NAMESPACE_ORGANIZATIONS
        .iter()
        .find(|(prefix, _)| namespace.starts_with(*prefix))
    {
        return Some((*organization).to_string());
    }
    if let Some(organization) = vendor_keyword(namespace) {
        return Some(organization);
    }

    let (_, after_urn) = namespace.split_once("urn:")?;
    after_urn
        .split(':')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn vendor_keyword(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    VENDOR_KEYWORDS
        .iter()
        .find(|keyword| lowered.contains(**keyword))
        .map(|keyword| (*keyword).to_string())
}
