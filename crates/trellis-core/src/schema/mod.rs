//! Schema model and validator.
//!
//! A [`Schema`] is pure data: declarative descriptions of every permissible
//! node and edge type, their fields, and their connection constraints. The
//! [`validator`] checks a schema for internal consistency before a store
//! will accept it; an invalid schema prevents store construction entirely.

pub mod types;
pub mod validator;

pub use types::{
    ConnectionConstraint, EdgeTypeConfig, FieldConstraint, NodeTypeConfig, Schema,
};
pub use validator::validate_schema;
