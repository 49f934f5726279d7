//! Capability URI parsing

use super::CapabilityEntry;
use crate::catalog::model::DeviationRef;

const NETCONF_BASE_MARKER: &str = ":netconf:base:";
const CAPABILITY_MARKER: &str = ":capability:";

/// Parse a module capability URI such as
/// `http://example.com/ns?module=foo&revision=2020-01-01&features=a,b`
///
/// Returns `None` when the URI carries no `module=` reference.
#[must_use]
pub fn parse_capability_uri(uri: &str) -> Option<CapabilityEntry> {
    let (_, module_and_more) = uri.trim().split_once("module=")?;
    let mut parts = module_and_more.split('&');
    let module_name = parts.next()?.trim();
    if module_name.is_empty() {
        return None;
    }

    let mut entry = CapabilityEntry::new(module_name);
    for part in parts {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim() {
            "revision" if !value.is_empty() => entry.revision = Some(value.to_string()),
            "features" => entry.features = split_list(value),
            "deviations" => {
                entry.deviations = split_list(value)
                    .into_iter()
                    .map(DeviationRef::new)
                    .collect();
            }
            _ => {}
        }
    }
    Some(entry)
}

/// Split capability URIs into `(capabilities, netconf_versions)`
///
/// NETCONF base URIs go to the version list; other `:capability:` URIs are
/// stripped of their query suffix and kept as capabilities. Everything else
/// (module URIs in particular) is ignored.
#[must_use]
pub fn classify_capabilities<S: AsRef<str>>(uris: &[S]) -> (Vec<String>, Vec<String>) {
    let mut capabilities = Vec::new();
    let mut netconf_versions = Vec::new();

    for uri in uris {
        let uri = uri.as_ref().trim();
        if uri.contains(NETCONF_BASE_MARKER) {
            netconf_versions.push(uri.to_string());
        } else if uri.contains(CAPABILITY_MARKER) {
            let without_query = uri.split('?').next().unwrap_or(uri);
            capabilities.push(without_query.to_string());
        }
    }

    (capabilities, netconf_versions)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
