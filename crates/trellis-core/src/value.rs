//! Field value model for node and edge data.
//!
//! Schemas declare four field types (string, number, boolean, array), so
//! instance data is a closed sum type rather than free-form JSON. This keeps
//! runtime type checks total: every stored value has exactly one
//! [`FieldType`], and the validator compares it against the declared one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The four field types a schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
        };
        write!(f, "{name}")
    }
}

/// A single field value carried by a node or edge.
///
/// Serializes transparently (`"alice"`, `42`, `true`, `[...]`) so snapshot
/// blobs and schema documents read as plain JSON/YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Runtime type of this value, for validation against a declared type.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::String(_) => FieldType::String,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Array(_) => FieldType::Array,
        }
    }

    /// Borrow the string contents, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the array elements, if this is an array value.
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Field map carried by every node and edge.
///
/// `BTreeMap` keeps iteration deterministic, which keeps snapshot blobs and
/// validation error ordering stable across runs.
pub type DataMap = BTreeMap<String, FieldValue>;

/// Convenience constructor for a [`DataMap`] from `(name, value)` pairs.
pub fn data_map<K, V, I>(fields: I) -> DataMap
where
    K: Into<String>,
    V: Into<FieldValue>,
    I: IntoIterator<Item = (K, V)>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_type_matches_variant() {
        assert_eq!(FieldValue::from("x").field_type(), FieldType::String);
        assert_eq!(FieldValue::from(1.5).field_type(), FieldType::Number);
        assert_eq!(FieldValue::from(true).field_type(), FieldType::Boolean);
        assert_eq!(
            FieldValue::from(vec!["a", "b"]).field_type(),
            FieldType::Array
        );
    }

    #[test]
    fn test_untagged_serialization_round_trip() {
        let value = FieldValue::Array(vec![
            FieldValue::from("alice"),
            FieldValue::from(3.0),
            FieldValue::from(false),
        ]);

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"["alice",3.0,false]"#);

        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_data_map_builder() {
        let data = data_map([("name", "alice")]);
        assert_eq!(data.get("name").and_then(FieldValue::as_str), Some("alice"));
    }
}
