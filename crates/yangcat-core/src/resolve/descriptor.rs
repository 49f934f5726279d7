//! ModuleDescriptor construction from a statement tree

use std::path::Path;

use chrono::NaiveDate;

use crate::catalog::model::{ModuleDescriptor, ModuleRef, ModuleType};
use crate::parser::Statement;

/// Revision recorded when a module declares no usable revision
pub const DEFAULT_REVISION: &str = "1970-01-01";

const DEFAULT_YANG_VERSION: &str = "1.0";
const OPENCONFIG_VERSION: &str = "openconfig-version";

/// Descriptor fields that follow from the statement tree alone
///
/// Organization, namespace, schema URL, conformance and content hash are
/// filled in by the engine.
pub(super) fn from_statement(module: &Statement, requested: &str, path: &Path) -> ModuleDescriptor {
    let module_type = if module.is_submodule() {
        ModuleType::Submodule
    } else {
        ModuleType::Module
    };
    let belongs_to = module.find("belongs-to");
    let prefix = match module_type {
        ModuleType::Module => module.find_arg("prefix"),
        ModuleType::Submodule => belongs_to.and_then(|b| b.find_arg("prefix")),
    };

    ModuleDescriptor {
        name: module.arg().unwrap_or(requested).to_string(),
        revision: normalize_revision(module.find_arg("revision")),
        organization: String::new(),
        namespace: None,
        prefix: prefix.map(str::to_string),
        module_type,
        belongs_to: belongs_to.and_then(Statement::arg).map(str::to_string),
        yang_version: yang_version(module.find_arg("yang-version")),
        semantic_version: semantic_version(module),
        schema_url: None,
        conformance_type: None,
        submodules: references(module, "include"),
        imports: references(module, "import"),
        features: Vec::new(),
        deviations: Vec::new(),
        path: path.to_path_buf(),
        content_hash: String::new(),
    }
}

/// Validate a revision date
///
/// An impossible February 29th becomes the 28th; anything else that is not
/// a calendar date, or a missing revision, becomes [`DEFAULT_REVISION`].
#[must_use]
pub fn normalize_revision(revision: Option<&str>) -> String {
    let Some(revision) = revision.map(str::trim) else {
        return DEFAULT_REVISION.to_string();
    };
    if NaiveDate::parse_from_str(revision, "%Y-%m-%d").is_ok() {
        return revision.to_string();
    }
    if let Some(year) = revision.strip_suffix("-02-29") {
        let fallback = format!("{year}-02-28");
        if NaiveDate::parse_from_str(&fallback, "%Y-%m-%d").is_ok() {
            return fallback;
        }
    }
    DEFAULT_REVISION.to_string()
}

/// Module name implied by a schema file name (`name@rev.yang` or `name.yang`)
pub(super) fn name_from_file(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.split_once('@') {
        Some((name, _)) => name.to_string(),
        None => stem,
    }
}

fn yang_version(version: Option<&str>) -> String {
    match version.map(str::trim) {
        None | Some("1") => DEFAULT_YANG_VERSION.to_string(),
        Some(version) => version.to_string(),
    }
}

/// `<prefix>:openconfig-version` under any extension prefix
fn semantic_version(module: &Statement) -> Option<String> {
    module
        .substatements
        .iter()
        .find(|s| {
            s.keyword
                .split_once(':')
                .is_some_and(|(_, name)| name == OPENCONFIG_VERSION)
        })
        .and_then(Statement::arg)
        .map(str::to_string)
}

fn references(module: &Statement, keyword: &str) -> Vec<ModuleRef> {
    module
        .find_all(keyword)
        .filter_map(|s| {
            let name = s.arg()?;
            Some(ModuleRef::new(name, s.find_arg("revision-date")))
        })
        .collect()
}
