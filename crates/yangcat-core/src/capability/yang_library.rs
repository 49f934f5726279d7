//! YANG-Library document parsing
//!
//! Accepts both the RFC 7895 `<modules-state>` layout and the RFC 8525
//! `<module-set>` layout. Only direct children of a module element are
//! read, so nested `<submodule>` names and revisions are not mistaken for
//! the module's own.

use roxmltree::{Document, Node};

use super::CapabilityEntry;
use crate::catalog::model::{ConformanceType, DeviationRef};

const MODULE_CONTAINERS: [&str; 2] = ["modules-state", "module-set"];

pub(super) fn is_yang_library(document: &Document<'_>) -> bool {
    document
        .descendants()
        .any(|node| MODULE_CONTAINERS.contains(&node.tag_name().name()))
}

/// One [`CapabilityEntry`] per listed module, in document order
#[must_use]
pub fn parse_yang_library(document: &Document<'_>) -> Vec<CapabilityEntry> {
    document
        .descendants()
        .filter(|node| MODULE_CONTAINERS.contains(&node.tag_name().name()))
        .flat_map(|container| container.children().filter(Node::is_element))
        .filter_map(|node| match node.tag_name().name() {
            "module" => parse_module(node, None),
            "import-only-module" => parse_module(node, Some(ConformanceType::Import)),
            _ => None,
        })
        .collect()
}

fn parse_module(module: Node<'_, '_>, forced: Option<ConformanceType>) -> Option<CapabilityEntry> {
    let mut entry = CapabilityEntry::new(child_text(module, "name")?);
    entry.revision = child_text(module, "revision");
    entry.conformance_type = forced.or_else(|| {
        child_text(module, "conformance-type").and_then(|t| t.parse().ok())
    });

    for child in module.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "feature" => {
                if let Some(feature) = text_of(child) {
                    entry.features.push(feature);
                }
            }
            "deviation" => {
                // RFC 8525 lists deviations as bare module names
                let deviation = match child_text(child, "name") {
                    Some(name) => DeviationRef {
                        name,
                        revision: child_text(child, "revision"),
                    },
                    None => match text_of(child) {
                        Some(name) => DeviationRef::new(name),
                        None => continue,
                    },
                };
                entry.deviations.push(deviation);
            }
            _ => {}
        }
    }

    Some(entry)
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .and_then(text_of)
}

fn text_of(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
