//! Flatten a parsed document into dotted key/value pairs, in document order.
//!
//! Mappings are recursed into; every other node is a leaf. Sequences are not
//! expanded (paths never index into them), so a list shows up as a single
//! entry at its key. Keys keep their original spelling.
//!
//! Keys are joined with `.` as-is, so a key that itself contains a dot
//! (`"a.b": 1`) lists as `a.b` even though no dotted path can address it:
//! path segments are split on every `.`.

use serde_yaml::{Mapping, Value};

use crate::resolve::{as_mapping, format_value, normalize_key};

/// Flatten `document` into `(dotted_key, leaf)` pairs.
///
/// A non-mapping root has no addressable keys and flattens to nothing.
/// Empty mappings contribute no entries. Keys that cannot be addressed by a
/// path (sequences or mappings used as keys) are skipped.
pub fn flatten(document: &Value) -> Vec<(String, &Value)> {
    let mut out = Vec::new();
    if let Some(map) = as_mapping(document) {
        flatten_mapping(map, "", &mut out);
    }
    out
}

fn flatten_mapping<'a>(map: &'a Mapping, prefix: &str, out: &mut Vec<(String, &'a Value)>) {
    for (key, child) in map {
        if normalize_key(key).is_none() {
            continue;
        }
        let segment = format_value(key);
        let dotted = if prefix.is_empty() {
            segment
        } else {
            format!("{prefix}.{segment}")
        };
        match as_mapping(child) {
            Some(inner) => flatten_mapping(inner, &dotted, out),
            None => out.push((dotted, child)),
        }
    }
}
