//! Error taxonomy for schema validation and graph mutations.
//!
//! Schema problems are fatal at construction time and never partially
//! applied; graph mutation errors reject the offending call atomically.
//! Update/delete on an absent id is a silent no-op rather than an error,
//! so there is no not-found variant here.

use crate::value::FieldType;
use thiserror::Error;

/// A malformed schema document. Raised while building a store, before any
/// data is accepted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("type '{key}' is registered under a different name '{name}'")]
    NameMismatch { key: String, name: String },

    #[error("type '{type_name}' has an empty description")]
    MissingDescription { type_name: String },

    #[error("edge type '{edge_type}' {side} references unknown node type '{node_type}'")]
    UnknownEndpointType {
        edge_type: String,
        side: ConnectionSide,
        node_type: String,
    },

    #[error("type '{type_name}' has a malformed access_control extension: expected a map")]
    MalformedAccessControl { type_name: String },

    #[error("failed to parse schema document: {0}")]
    Parse(String),
}

/// Which end of an edge a constraint or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionSide {
    Source,
    Target,
}

impl std::fmt::Display for ConnectionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionSide::Source => write!(f, "source"),
            ConnectionSide::Target => write!(f, "target"),
        }
    }
}

/// A rejected graph mutation or a failed snapshot operation.
///
/// Every validation variant is raised synchronously from the mutating call;
/// the store is left untouched when one occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("id '{id}' already exists in the store")]
    DuplicateId { id: String },

    #[error("unknown type '{type_name}': not declared in the schema")]
    UnknownType { type_name: String },

    #[error("type '{type_name}' requires field '{field}'")]
    MissingRequiredField { type_name: String, field: String },

    #[error("field '{field}' of type '{type_name}' expects {expected}, got {actual}")]
    FieldTypeMismatch {
        type_name: String,
        field: String,
        expected: FieldType,
        actual: FieldType,
    },

    #[error("field '{field}' of type '{type_name}' has value '{value}' outside its enum")]
    EnumViolation {
        type_name: String,
        field: String,
        value: String,
    },

    #[error("unknown property '{field}' for type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    #[error("edge '{edge_id}' references missing node '{node_id}'")]
    MissingEndpoint { edge_id: String, node_id: String },

    #[error("edge type '{edge_type}' {side} expects node type '{expected}', got '{actual}'")]
    EndpointTypeMismatch {
        edge_type: String,
        side: ConnectionSide,
        expected: String,
        actual: String,
    },

    #[error("cardinality violation: {side} of edge type '{edge_type}' already connected at node '{node_id}'")]
    CardinalityViolation {
        edge_type: String,
        side: ConnectionSide,
        node_id: String,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("snapshot serialization failed: {0}")]
    Serialization(String),

    #[error("snapshot backend error: {0}")]
    Backend(String),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Whether this error came from field/type validation (as opposed to
    /// structural problems like duplicate ids or missing endpoints).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownType { .. }
                | Self::MissingRequiredField { .. }
                | Self::FieldTypeMismatch { .. }
                | Self::EnumViolation { .. }
                | Self::UnknownField { .. }
        )
    }
}
