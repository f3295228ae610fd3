//! `/etc/os-release` parsing.
//!
//! Only the identifying keys are read: `ID`, `ID_LIKE`, `VARIANT_ID`,
//! `NAME`, `PRETTY_NAME` and `VERSION_ID`. Reading the file is left to the
//! detector; this module works on its content.

use std::collections::HashMap;

use crate::info::{Distribution, family_of};

/// Standard location of the os-release file.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Variants that replace the distribution id because they change how
/// software should be installed.
const ID_OVERRIDING_VARIANTS: &[&str] = &["silverblue", "kinoite"];

/// Parse `KEY=value` lines, stripping optional quotes. Comments and
/// malformed lines are ignored.
pub fn parse_fields(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

/// Build a [`Distribution`] from os-release content. `None` without an `ID`.
pub fn parse(content: &str) -> Option<Distribution> {
    let fields = parse_fields(content);
    let mut id = fields.get("ID")?.trim().to_ascii_lowercase();
    if id.is_empty() {
        return None;
    }

    if let Some(variant) = fields.get("VARIANT_ID").map(|v| v.to_ascii_lowercase()) {
        if ID_OVERRIDING_VARIANTS.contains(&variant.as_str()) {
            id = variant;
        }
    }

    let name = fields
        .get("NAME")
        .or_else(|| fields.get("PRETTY_NAME"))
        .cloned()
        .unwrap_or_else(|| id.clone());
    let version = fields.get("VERSION_ID").cloned().unwrap_or_default();

    let mut distribution = Distribution::new(id.clone(), name, version);
    if family_of(&id).is_none() {
        let like = fields.get("ID_LIKE").map(String::as_str).unwrap_or_default();
        if let Some(family) = like
            .split_whitespace()
            .find_map(|entry| family_of(&entry.to_ascii_lowercase()))
        {
            distribution = distribution.with_family(family);
        }
    }

    tracing::debug!(id = %distribution.id, family = %distribution.family, "Parsed os-release");
    Some(distribution)
}

impl Distribution {
    /// Parse `/etc/os-release` content. See [`parse`].
    pub fn from_os_release(content: &str) -> Option<Self> {
        parse(content)
    }
}
