//! Shared field validation for nodes and edges.
//!
//! Strict, closed-world checking: once a schema is attached, an instance may
//! carry exactly the declared fields and nothing else. Each failure mode is
//! a distinct [`GraphError`] variant so callers can tell a missing field
//! from a type mismatch from an unknown property.

use crate::error::{GraphError, GraphResult};
use crate::schema::FieldConstraint;
use crate::value::DataMap;
use std::collections::BTreeMap;

/// Validate an instance's data map against a type's declared fields.
///
/// Checks, in order: every required field is present; every present
/// declared field has the declared runtime type; every present declared
/// field with an `enum` constraint holds one of the allowed values; no
/// field exists outside the declaration.
pub(crate) fn validate_data(
    type_name: &str,
    declared: &BTreeMap<String, FieldConstraint>,
    data: &DataMap,
) -> GraphResult<()> {
    for (field, constraint) in declared {
        let value = match data.get(field) {
            Some(value) => value,
            None => {
                if constraint.required {
                    return Err(GraphError::MissingRequiredField {
                        type_name: type_name.to_string(),
                        field: field.clone(),
                    });
                }
                continue;
            }
        };

        let actual = value.field_type();
        if actual != constraint.field_type {
            return Err(GraphError::FieldTypeMismatch {
                type_name: type_name.to_string(),
                field: field.clone(),
                expected: constraint.field_type,
                actual,
            });
        }

        if let Some(allowed) = &constraint.allowed_values {
            if !allowed.contains(value) {
                return Err(GraphError::EnumViolation {
                    type_name: type_name.to_string(),
                    field: field.clone(),
                    value: value.to_string(),
                });
            }
        }
    }

    for field in data.keys() {
        if !declared.contains_key(field) {
            return Err(GraphError::UnknownField {
                type_name: type_name.to_string(),
                field: field.clone(),
            });
        }
    }

    Ok(())
}
