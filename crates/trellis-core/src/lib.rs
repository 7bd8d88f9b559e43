//! # trellis-core
//!
//! In-memory, schema-governed graph store: typed nodes and edges held under
//! explicit structural invariants, with change notifications and snapshot
//! persistence. Core defines the abstractions (embedding provider, snapshot
//! store); infrastructure crates provide implementations:
//!
//! - `trellis-enrichment`: embedding providers and the similarity linker
//! - `trellis-query`: unification query engine over flattened facts
//!
//! ## Example
//!
//! ```
//! use trellis_core::graph::{GraphStore, Node};
//! use trellis_core::schema::{FieldConstraint, NodeTypeConfig, Schema};
//! use trellis_core::value::{data_map, FieldType};
//!
//! let schema = Schema::new().with_node_type(
//!     NodeTypeConfig::new("person", "A person")
//!         .with_field("name", FieldConstraint::required(FieldType::String)),
//! );
//!
//! let mut store = GraphStore::with_schema(schema).unwrap();
//! store
//!     .add_node(Node::new("person", data_map([("name", "alice")])))
//!     .unwrap();
//! assert_eq!(store.node_count(), 1);
//! ```

pub mod embedding;
pub mod error;
pub mod graph;
pub mod persistence;
pub mod schema;
pub mod value;

pub use embedding::{fallback_embedding, EmbeddingError, EmbeddingProvider, EmbeddingResult};
pub use error::{ConnectionSide, GraphError, GraphResult, SchemaError};
pub use graph::{
    Edge, EdgeUpdate, GraphEvent, GraphStore, Node, NodeUpdate, SoftLink, SoftLinkReason,
};
pub use persistence::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore, SNAPSHOT_KEY};
pub use schema::{
    validate_schema, ConnectionConstraint, EdgeTypeConfig, FieldConstraint, NodeTypeConfig, Schema,
};
pub use value::{data_map, DataMap, FieldType, FieldValue};
