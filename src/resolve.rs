//! Path resolution: walk a parsed document by dotted path and stringify the
//! leaf.
//!
//! Keys are matched case-insensitively. At each level every mapping key is
//! rendered to its string form and lowercased, then compared with the
//! lowercased path segment. When two keys of one mapping fold to the same
//! name, the one appearing last in the document wins.
//!
//! Paths never index into sequences: a path that continues through a
//! sequence, or past a scalar, resolves to nothing.

use serde_yaml::{Mapping, Number, Value};

/// Split a tag value such as `service.timeout` into its segments.
pub fn split_path(tag: &str) -> Vec<&str> {
    tag.split('.').collect()
}

/// Resolve `path` against `tree`, returning the stringified leaf.
///
/// Returns `None` when `path` is empty, when any segment has no matching key,
/// or when the walk hits a non-mapping node before the last segment.
pub fn find_value(tree: &Value, path: &[&str]) -> Option<String> {
    let node = find_node(tree, path)?;
    Some(format_value(node))
}

/// Like [`find_value`] but returns the node itself.
pub fn find_node<'a>(tree: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let segment = first.to_lowercase();

    let Some(map) = as_mapping(tree) else {
        tracing::trace!(segment = %segment, "path continues past a non-mapping node");
        return None;
    };

    let child = lookup(map, &segment)?;
    if rest.is_empty() {
        Some(child)
    } else {
        find_node(child, rest)
    }
}

/// Render a mapping key for case-insensitive comparison. Sequences and
/// mappings used as keys have no string form and never match.
pub fn normalize_key(key: &Value) -> Option<String> {
    match key {
        Value::Sequence(_) | Value::Mapping(_) => None,
        Value::Tagged(tagged) => normalize_key(&tagged.value),
        scalar => Some(format_value(scalar).to_lowercase()),
    }
}

/// Stringify a value the way it is handed to the host's coercion routine.
///
/// Scalars render in their canonical textual form, null renders empty, and
/// collections render as compact YAML. Whole-valued floats drop the fraction
/// (`4.0` renders `4`) so integer fields accept them.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => format_value(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{value:?}")),
    }
}

fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}

pub(crate) fn as_mapping(value: &Value) -> Option<&Mapping> {
    match value {
        Value::Mapping(map) => Some(map),
        Value::Tagged(tagged) => as_mapping(&tagged.value),
        _ => None,
    }
}

fn lookup<'a>(map: &'a Mapping, segment: &str) -> Option<&'a Value> {
    // Last key folding to `segment` wins.
    map.iter()
        .filter(|(key, _)| normalize_key(key).as_deref() == Some(segment))
        .last()
        .map(|(_, value)| value)
}
