//! The unification engine.
//!
//! Resolves one flat pattern against a fact list per call; multi-hop
//! composition (feeding one query's bindings into the next) is the caller's
//! responsibility. No backtracking across pattern literals, no planning,
//! no indexes: a linear walk over facts in insertion order.

use crate::fact::{facts_from_store, Fact};
use crate::pattern::{Pattern, PatternValue};
use std::collections::BTreeMap;
use tracing::debug;
use trellis_core::graph::GraphStore;
use trellis_core::value::FieldValue;

/// Variable-name to value bindings produced by a successful unification.
pub type Bindings = BTreeMap<String, FieldValue>;

/// Pattern-matching query engine over a flat fact list.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    facts: Vec<Fact>,
}

impl QueryEngine {
    /// Engine over an explicit fact list.
    pub fn new(facts: Vec<Fact>) -> Self {
        Self { facts }
    }

    /// Engine over a snapshot of the store's current entity set (nodes
    /// first, then edges, each in insertion order).
    pub fn from_store(store: &GraphStore) -> Self {
        Self::new(facts_from_store(store))
    }

    /// The facts this engine resolves against.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Return every binding set that makes `pattern` unify with some fact.
    ///
    /// Solutions follow fact insertion order, then array-expansion order
    /// within a fact. The empty pattern unifies with every fact, yielding
    /// one empty binding set per fact. A pattern field absent from every
    /// fact yields zero solutions, not an error.
    pub fn query(&self, pattern: &Pattern) -> Vec<Bindings> {
        let mut solutions = Vec::new();
        for fact in &self.facts {
            unify(pattern.fields(), fact, Bindings::new(), &mut solutions);
        }
        debug!(solutions = solutions.len(), "query resolved");
        solutions
    }
}

/// Unify the remaining pattern fields against one fact.
///
/// Walks fields in pattern order. A field absent from the fact fails the
/// whole fact, with no partial results. An unbound variable meeting an array
/// fact value branches once per element; a bound variable is treated as a
/// concrete value on re-occurrence, so bindings stay consistent rather than
/// last-write-wins.
fn unify(
    fields: &[(String, PatternValue)],
    fact: &Fact,
    bindings: Bindings,
    solutions: &mut Vec<Bindings>,
) {
    let Some(((field, constraint), rest)) = fields.split_first() else {
        solutions.push(bindings);
        return;
    };

    let Some(actual) = fact.get(field) else {
        return;
    };

    match constraint {
        PatternValue::Literal(expected) => {
            if value_matches(expected, actual) {
                unify(rest, fact, bindings, solutions);
            }
        }
        PatternValue::Variable(name) => match bindings.get(name) {
            Some(bound) => {
                if value_matches(&bound.clone(), actual) {
                    unify(rest, fact, bindings, solutions);
                }
            }
            None => {
                if let FieldValue::Array(elements) = actual {
                    // One-to-many unification: one candidate solution per
                    // array element.
                    for element in elements {
                        let mut branch = bindings.clone();
                        branch.insert(name.clone(), element.clone());
                        unify(rest, fact, branch, solutions);
                    }
                } else {
                    let mut bindings = bindings;
                    bindings.insert(name.clone(), actual.clone());
                    unify(rest, fact, bindings, solutions);
                }
            }
        },
    }
}

/// A concrete value matches the fact's value exactly, or by membership when
/// the fact's value is an array.
fn value_matches(expected: &FieldValue, actual: &FieldValue) -> bool {
    if expected == actual {
        return true;
    }
    if let FieldValue::Array(elements) = actual {
        return elements.contains(expected);
    }
    false
}
