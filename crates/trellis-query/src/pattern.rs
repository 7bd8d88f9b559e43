//! Query patterns.
//!
//! A pattern is an ordered list of field constraints. Each value is either
//! a literal the fact must carry, or a named logic variable decided at
//! construction time; no sigil sniffing on string contents.

use trellis_core::value::FieldValue;

/// A single pattern field: literal constraint or logic variable.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternValue {
    /// Must equal the fact's field value (or be a member, when the fact's
    /// value is an array).
    Literal(FieldValue),

    /// Unifies with the fact's field value and binds the name for the rest
    /// of that fact's evaluation.
    Variable(String),
}

/// A flat query pattern: one field map with literals and variables.
///
/// Fields unify in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    fields: Vec<(String, PatternValue)>,
}

impl Pattern {
    /// The empty pattern, which unifies with every fact.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to hold (or contain) a literal value.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields
            .push((field.into(), PatternValue::Literal(value.into())));
        self
    }

    /// Bind `field` to the logic variable `variable`.
    pub fn with_variable(mut self, field: impl Into<String>, variable: impl Into<String>) -> Self {
        self.fields
            .push((field.into(), PatternValue::Variable(variable.into())));
        self
    }

    /// The ordered field constraints.
    pub fn fields(&self) -> &[(String, PatternValue)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
