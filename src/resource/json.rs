//! JSON resource parsing: a flat string-keyed object.
//!
//! Non-string values (numbers, booleans, nested structures) are kept as
//! [`ValueKind::Typed`] entries so the translatable filter excludes them,
//! matching how typed resx payloads are handled.

use serde_json::Value;

use super::{ResourceEntry, ResourceTable, ValueKind};

/// Parse a JSON resource document. Returns a human-readable reason on failure.
pub(super) fn parse(text: &str) -> Result<ResourceTable, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;

    let Value::Object(map) = value else {
        return Err("expected a top-level JSON object".to_string());
    };

    let mut table = ResourceTable::new();
    for (key, value) in map {
        let entry = match value {
            Value::String(s) => ResourceEntry {
                key,
                value: s,
                kind: ValueKind::Text,
            },
            other => ResourceEntry {
                key,
                value: other.to_string(),
                kind: ValueKind::Typed,
            },
        };
        table.insert_entry(entry);
    }
    Ok(table)
}
