//! Field and tag containers shared by the flattener and the grouping engine

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flattened field name -> scalar value
pub type FieldSet = BTreeMap<String, FieldValue>;

/// Tag key -> tag value
pub type TagSet = BTreeMap<String, String>;

/// A scalar leaf taken from a Jolokia response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer
    Integer(i64),
    /// Floating point, also used for unsigned values beyond `i64`
    Float(f64),
    /// String
    String(String),
    /// Boolean
    Boolean(bool),
    /// Null
    Null,
    /// Arrays are leaves; their elements are not flattened
    Array(Vec<Value>),
}

impl FieldValue {
    /// Convert a non-object JSON value into a field value
    ///
    /// Objects are not leaves; callers flatten them first. One reaching
    /// this point is kept as a single-element array so that nothing is lost.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Array(items) => FieldValue::Array(items.clone()),
            Value::Object(_) => FieldValue::Array(vec![value.clone()]),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}
