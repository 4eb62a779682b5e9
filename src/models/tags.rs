//! Tag-set arithmetic over the comma-delimited `tags` attribute.

use std::collections::BTreeSet;

/// Split a stored tag string into a set of trimmed, non-empty tokens.
pub fn parse_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Serialize a tag set back to its stored form: sorted, comma-and-space
/// joined. The `BTreeSet` ordering supplies the sort.
pub fn join_set(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Normalize an arbitrary tag string to canonical stored form.
pub fn normalize(raw: &str) -> String {
    join_set(&parse_set(raw))
}
