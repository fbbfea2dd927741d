//! Inspection operations: key lookup, listing, and result types.
//!
//! Provides the logic behind `get` and `list`, and the `LookupResult` enum
//! that callers use to display results.

use std::fmt;

use serde_yaml::Value;

use crate::error::YamlfigError;
use crate::flatten::flatten;
use crate::provider::PROVIDER_NAME;
use crate::resolve::{find_value, format_value, split_path};

/// Result of an inspection operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// A key's resolved value.
    KeyValue { key: String, value: String },
    /// Every leaf of the document.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            LookupResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Get a value by dotted key (case-insensitive).
pub fn get_value(document: &Value, key: &str) -> Result<LookupResult, YamlfigError> {
    let value =
        find_value(document, &split_path(key)).ok_or_else(|| YamlfigError::ValueNotFound {
            provider: PROVIDER_NAME.into(),
            path: key.into(),
        })?;

    Ok(LookupResult::KeyValue {
        key: key.into(),
        value,
    })
}

/// List every leaf of the document as flattened dotted key-value pairs.
pub fn list_values(document: &Value) -> LookupResult {
    let entries = flatten(document)
        .into_iter()
        .map(|(key, value)| {
            let display = match value {
                Value::Null => "<not set>".to_string(),
                other => format_value(other),
            };
            (key, display)
        })
        .collect();

    LookupResult::Listing { entries }
}
