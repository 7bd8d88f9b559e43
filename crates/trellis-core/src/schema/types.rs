//! Declarative schema types.
//!
//! Shaped exactly like the configuration document: top-level `node_types`
//! and `edge_types` maps, each entry keyed by its canonical type name. Loads
//! from JSON or YAML via serde; no other configuration surface exists.

use crate::error::SchemaError;
use crate::value::{FieldType, FieldValue};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Constraint on a single declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraint {
    /// Declared runtime type.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field must be present on every instance.
    #[serde(default)]
    pub required: bool,

    /// Closed set of allowed values, when declared.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<FieldValue>>,
}

impl FieldConstraint {
    /// A required field of the given type.
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
            allowed_values: None,
        }
    }

    /// An optional field of the given type.
    pub fn optional(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
            allowed_values: None,
        }
    }

    /// Restrict the field to a closed set of values.
    pub fn with_allowed_values(mut self, values: Vec<FieldValue>) -> Self {
        self.allowed_values = Some(values);
        self
    }
}

/// Declaration of a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTypeConfig {
    /// Canonical type identifier; must equal the registration key.
    pub name: String,

    /// Human-readable description. Must be non-empty.
    pub description: String,

    /// Alternative names, for discovery tooling.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,

    /// Field name to constraint.
    #[serde(default)]
    pub data: BTreeMap<String, FieldConstraint>,

    /// Forward-compatible extension; structurally checked only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<JsonValue>,
}

impl NodeTypeConfig {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            synonyms: Vec::new(),
            data: BTreeMap::new(),
            access_control: None,
        }
    }

    /// Declare a field on this type.
    pub fn with_field(mut self, name: impl Into<String>, constraint: FieldConstraint) -> Self {
        self.data.insert(name.into(), constraint);
        self
    }
}

/// Constraint on one end of an edge type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConstraint {
    /// Node type the connected node must have.
    pub node_type: String,

    /// Whether more than one edge of this type may attach on this side of
    /// a single node.
    pub multiple: bool,

    /// Whether the connection is mandatory for the node type.
    pub required: bool,
}

impl ConnectionConstraint {
    pub fn new(node_type: impl Into<String>, multiple: bool, required: bool) -> Self {
        Self {
            node_type: node_type.into(),
            multiple,
            required,
        }
    }
}

/// Declaration of an edge type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTypeConfig {
    /// Canonical type identifier; must equal the registration key.
    pub name: String,

    /// Human-readable description. Must be non-empty.
    pub description: String,

    /// Alternative names, for discovery tooling.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,

    /// Field name to constraint.
    #[serde(default)]
    pub data: BTreeMap<String, FieldConstraint>,

    /// Constraint on the source end.
    pub source: ConnectionConstraint,

    /// Constraint on the target end.
    pub target: ConnectionConstraint,

    /// Forward-compatible extension; structurally checked only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<JsonValue>,
}

impl EdgeTypeConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        source: ConnectionConstraint,
        target: ConnectionConstraint,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            synonyms: Vec::new(),
            data: BTreeMap::new(),
            source,
            target,
            access_control: None,
        }
    }

    /// Declare a field on this type.
    pub fn with_field(mut self, name: impl Into<String>, constraint: FieldConstraint) -> Self {
        self.data.insert(name.into(), constraint);
        self
    }
}

/// The full closed-world type declaration for one graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Node type name to declaration.
    #[serde(default)]
    pub node_types: BTreeMap<String, NodeTypeConfig>,

    /// Edge type name to declaration.
    #[serde(default)]
    pub edge_types: BTreeMap<String, EdgeTypeConfig>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type under its own declared name.
    pub fn with_node_type(mut self, config: NodeTypeConfig) -> Self {
        self.node_types.insert(config.name.clone(), config);
        self
    }

    /// Register an edge type under its own declared name.
    pub fn with_edge_type(mut self, config: EdgeTypeConfig) -> Self {
        self.edge_types.insert(config.name.clone(), config);
        self
    }

    /// Parse a schema from a JSON document.
    pub fn from_json_str(document: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(document).map_err(|e| SchemaError::Parse(e.to_string()))
    }

    /// Parse a schema from a YAML document.
    pub fn from_yaml_str(document: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(document).map_err(|e| SchemaError::Parse(e.to_string()))
    }

    /// Look up a node type declaration.
    pub fn node_type(&self, name: &str) -> Option<&NodeTypeConfig> {
        self.node_types.get(name)
    }

    /// Look up an edge type declaration.
    pub fn edge_type(&self, name: &str) -> Option<&EdgeTypeConfig> {
        self.edge_types.get(name)
    }
}
