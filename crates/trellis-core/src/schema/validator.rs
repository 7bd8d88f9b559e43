//! Schema consistency checks.
//!
//! Pure functions over a [`Schema`]; nothing here mutates input. The store
//! runs [`validate_schema`] at construction time and refuses to exist with
//! an invalid schema, so every later mutation can trust the declarations.

use crate::error::{ConnectionSide, SchemaError};
use crate::schema::types::{EdgeTypeConfig, NodeTypeConfig, Schema};
use serde_json::Value as JsonValue;

/// Check a schema for internal consistency.
///
/// Checks, in order: every registration key equals its type's declared
/// `name`; every description is non-empty; every edge type's `source` and
/// `target` name an existing node type; the optional `access_control`
/// extension, when present, is a map. Absence of `access_control` is
/// always valid.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    for (key, node_type) in &schema.node_types {
        check_node_type(key, node_type)?;
    }
    for (key, edge_type) in &schema.edge_types {
        check_edge_type(key, edge_type, schema)?;
    }
    Ok(())
}

fn check_node_type(key: &str, config: &NodeTypeConfig) -> Result<(), SchemaError> {
    if key != config.name {
        return Err(SchemaError::NameMismatch {
            key: key.to_string(),
            name: config.name.clone(),
        });
    }
    if config.description.trim().is_empty() {
        return Err(SchemaError::MissingDescription {
            type_name: config.name.clone(),
        });
    }
    check_access_control(&config.name, config.access_control.as_ref())
}

fn check_edge_type(key: &str, config: &EdgeTypeConfig, schema: &Schema) -> Result<(), SchemaError> {
    if key != config.name {
        return Err(SchemaError::NameMismatch {
            key: key.to_string(),
            name: config.name.clone(),
        });
    }
    if config.description.trim().is_empty() {
        return Err(SchemaError::MissingDescription {
            type_name: config.name.clone(),
        });
    }
    for (side, connection) in [
        (ConnectionSide::Source, &config.source),
        (ConnectionSide::Target, &config.target),
    ] {
        if !schema.node_types.contains_key(&connection.node_type) {
            return Err(SchemaError::UnknownEndpointType {
                edge_type: config.name.clone(),
                side,
                node_type: connection.node_type.clone(),
            });
        }
    }
    check_access_control(&config.name, config.access_control.as_ref())
}

fn check_access_control(
    type_name: &str,
    access_control: Option<&JsonValue>,
) -> Result<(), SchemaError> {
    match access_control {
        None => Ok(()),
        Some(JsonValue::Object(_)) => Ok(()),
        Some(_) => Err(SchemaError::MalformedAccessControl {
            type_name: type_name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{ConnectionConstraint, EdgeTypeConfig, NodeTypeConfig};
    use serde_json::json;

    fn person_schema() -> Schema {
        Schema::new().with_node_type(NodeTypeConfig::new("person", "A person"))
    }

    #[test]
    fn test_valid_schema_passes() {
        let schema = person_schema().with_edge_type(EdgeTypeConfig::new(
            "manages",
            "Management relationship",
            ConnectionConstraint::new("person", false, false),
            ConnectionConstraint::new("person", true, false),
        ));
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_registration_key_must_match_name() {
        let mut schema = person_schema();
        let mislabeled = NodeTypeConfig::new("company", "A company");
        schema.node_types.insert("org".to_string(), mislabeled);

        let err = validate_schema(&schema).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NameMismatch {
                key: "org".to_string(),
                name: "company".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_description_rejected() {
        let schema = Schema::new().with_node_type(NodeTypeConfig::new("person", "  "));
        let err = validate_schema(&schema).unwrap_err();
        assert!(matches!(err, SchemaError::MissingDescription { .. }));
    }

    #[test]
    fn test_edge_endpoints_must_name_existing_node_types() {
        let schema = person_schema().with_edge_type(EdgeTypeConfig::new(
            "works_at",
            "Employment",
            ConnectionConstraint::new("person", true, false),
            ConnectionConstraint::new("company", true, false),
        ));

        let err = validate_schema(&schema).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownEndpointType {
                edge_type: "works_at".to_string(),
                side: ConnectionSide::Target,
                node_type: "company".to_string(),
            }
        );
    }

    #[test]
    fn test_access_control_must_be_a_map_when_present() {
        let mut config = NodeTypeConfig::new("person", "A person");
        config.access_control = Some(json!({"read": ["admin"]}));
        assert!(validate_schema(&Schema::new().with_node_type(config)).is_ok());

        let mut config = NodeTypeConfig::new("person", "A person");
        config.access_control = Some(json!("everyone"));
        let err = validate_schema(&Schema::new().with_node_type(config)).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedAccessControl { .. }));
    }
}
