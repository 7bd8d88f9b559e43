//! Core walkthrough: schema-governed CRUD, cascade deletes, change events,
//! and snapshot persistence, with no enrichment or query crates involved.
//!
//! Run with: `cargo run --example graph_demo`

use anyhow::Result;
use async_trait::async_trait;
use trellis_core::embedding::{EmbeddingError, EmbeddingProvider, EmbeddingResult};
use trellis_core::graph::{Edge, GraphStore, Node, NodeUpdate};
use trellis_core::persistence::MemorySnapshotStore;
use trellis_core::schema::{
    ConnectionConstraint, EdgeTypeConfig, FieldConstraint, NodeTypeConfig, Schema,
};
use trellis_core::value::{data_map, DataMap, FieldType};

/// Stand-in for a real embedding service that happens to be offline.
struct OfflineProvider;

#[async_trait]
impl EmbeddingProvider for OfflineProvider {
    async fn embed(&self, _text: &str) -> EmbeddingResult<Vec<f32>> {
        Err(EmbeddingError::Provider("connection refused".to_string()))
    }

    fn dimensions(&self) -> usize {
        32
    }

    fn name(&self) -> &str {
        "offline"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let schema = Schema::new()
        .with_node_type(
            NodeTypeConfig::new("person", "A person in the org chart")
                .with_field("name", FieldConstraint::required(FieldType::String))
                .with_field("age", FieldConstraint::optional(FieldType::Number)),
        )
        .with_edge_type(EdgeTypeConfig::new(
            "manages",
            "Management relationship",
            ConnectionConstraint::new("person", false, false),
            ConnectionConstraint::new("person", true, false),
        ));

    let mut store = GraphStore::with_schema(schema)?;
    let mut events = store.subscribe();

    store.add_node(Node::new("person", data_map([("name", "alice")])).with_id("alice"))?;
    store.add_node(Node::new("person", data_map([("name", "bob")])).with_id("bob"))?;
    store.add_edge(Edge::new("manages", "alice", "bob", DataMap::new()).with_id("e1"))?;

    // The store rejects what the schema does not declare.
    let rejected = store.add_node(Node::new("person", data_map([("nickname", "carol")])));
    println!("rejected: {}", rejected.unwrap_err());

    // Embedding failures fall back instead of blocking creation.
    let carol = store
        .create_node(
            "person",
            data_map([("name", "carol")]),
            "carol, new hire",
            &OfflineProvider,
        )
        .await?;
    println!(
        "carol embedded with {} fallback dimensions",
        carol.embedding.as_ref().map_or(0, Vec::len)
    );

    store.update_node("bob", NodeUpdate::data(data_map([("age", 35.0)])));

    // Deleting alice cascades to the manages edge.
    store.delete_node("alice");
    println!("{} nodes, {} edges", store.node_count(), store.edge_count());

    // One blob out, one identical graph back in.
    let blobs = MemorySnapshotStore::new();
    store.save(&blobs).await?;
    let mut restored = GraphStore::new();
    restored.load(&blobs).await?;
    assert_eq!(restored.nodes(), store.nodes());

    while let Ok(event) = events.try_recv() {
        println!("event: {}", event.event_type());
    }

    Ok(())
}
