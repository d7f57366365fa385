//! Nested JSON flattening
//!
//! Collapses composite attribute values into a single level of fields whose
//! names join the path with `_`:
//!
//! ```text
//! "value": { "Usage": { "committed": 456, "used": 123 } }
//!   => { "Usage_committed": 456, "Usage_used": 123 }
//! ```

use serde_json::Value;

use super::field::{FieldSet, FieldValue};

/// Field name given to a bare scalar flattened without a prefix
pub const BARE_VALUE_FIELD: &str = "value";

/// Flatten `node` into a new field set, prefixing every field with `prefix`
pub fn flatten(node: &Value, prefix: &str) -> FieldSet {
    let mut fields = FieldSet::new();
    flatten_into(node, prefix, &mut fields);
    fields
}

/// Flatten `node` into an existing field set
///
/// Fields already present under the same name are overwritten.
pub fn flatten_into(node: &Value, prefix: &str, fields: &mut FieldSet) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                let name = join_field_name(prefix, key);
                flatten_into(value, &name, fields);
            }
        }
        leaf => {
            let name = if prefix.is_empty() {
                BARE_VALUE_FIELD.to_string()
            } else {
                prefix.to_string()
            };
            fields.insert(name, FieldValue::from_json(leaf));
        }
    }
}

fn join_field_name(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}_{}", prefix, key)
    }
}
