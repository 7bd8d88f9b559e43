//! # trellis-query
//!
//! Pattern-matching query facility over the graph store: stored entities
//! become flattened [`Fact`] records, and queries are resolved through
//! unification of [`Pattern`]s containing literals and logic variables.
//!
//! ## Example
//!
//! ```
//! use trellis_query::{Fact, Pattern, QueryEngine};
//! use trellis_core::value::data_map;
//!
//! let engine = QueryEngine::new(vec![
//!     Fact::from(data_map([("type", "post"), ("author", "alice")])),
//!     Fact::from(data_map([("type", "post"), ("author", "bob")])),
//! ]);
//!
//! let pattern = Pattern::new()
//!     .with("type", "post")
//!     .with_variable("author", "X");
//!
//! let solutions = engine.query(&pattern);
//! assert_eq!(solutions.len(), 2);
//! assert_eq!(solutions[0]["X"].as_str(), Some("alice"));
//! ```

pub mod engine;
pub mod fact;
pub mod pattern;

pub use engine::{Bindings, QueryEngine};
pub use fact::{facts_from_store, Fact};
pub use pattern::{Pattern, PatternValue};
