//! NETCONF hello message parsing

use std::borrow::Cow;

use tracing::warn;

/// Texts of all `<capability>` elements, in document order
#[must_use]
pub fn parse_hello(document: &roxmltree::Document<'_>) -> Vec<String> {
    document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "capability")
        .filter_map(|node| node.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Escape `&` characters that do not start an entity reference
///
/// Devices frequently emit capability URIs with raw `&` separators, which
/// is not well-formed XML.
pub(super) fn repair_ampersands(xml: &str) -> Cow<'_, str> {
    let bare: Vec<usize> = xml
        .match_indices('&')
        .map(|(index, _)| index)
        .filter(|&index| !starts_entity(&xml[index + 1..]))
        .collect();

    if bare.is_empty() {
        return Cow::Borrowed(xml);
    }

    warn!("Capability document has {} unescaped `&`, escaping them", bare.len());
    let mut repaired = String::with_capacity(xml.len() + bare.len() * 4);
    let mut last = 0;
    for index in bare {
        repaired.push_str(&xml[last..index]);
        repaired.push_str("&amp;");
        last = index + 1;
    }
    repaired.push_str(&xml[last..]);
    Cow::Owned(repaired)
}

fn starts_entity(rest: &str) -> bool {
    let Some((reference, _)) = rest.split_once(';') else {
        return false;
    };
    if let Some(hex) = reference.strip_prefix("#x") {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some(decimal) = reference.strip_prefix('#') {
        return !decimal.is_empty() && decimal.chars().all(|c| c.is_ascii_digit());
    }
    !reference.is_empty() && reference.chars().all(|c| c.is_ascii_alphanumeric())
}
