//! Full pipeline walkthrough: schema-governed store, embedding enrichment,
//! soft-link discovery, and unification queries.
//!
//! Run with: `cargo run --example pipeline_demo`

use anyhow::Result;
use trellis_core::graph::{Edge, GraphStore};
use trellis_core::schema::{ConnectionConstraint, EdgeTypeConfig, FieldConstraint, NodeTypeConfig, Schema};
use trellis_core::value::{data_map, DataMap, FieldType, FieldValue};
use trellis_enrichment::{MockEmbeddingProvider, SimilarityLinker};
use trellis_query::{Pattern, QueryEngine};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let schema = Schema::new()
        .with_node_type(
            NodeTypeConfig::new("person", "An author on the site")
                .with_field("name", FieldConstraint::required(FieldType::String)),
        )
        .with_node_type(
            NodeTypeConfig::new("post", "A published article")
                .with_field("title", FieldConstraint::required(FieldType::String))
                .with_field("author", FieldConstraint::required(FieldType::String))
                .with_field("tags", FieldConstraint::optional(FieldType::Array)),
        )
        .with_edge_type(EdgeTypeConfig::new(
            "follows",
            "One person follows another",
            ConnectionConstraint::new("person", true, false),
            ConnectionConstraint::new("person", true, false),
        ));

    let mut store = GraphStore::with_schema(schema)?;
    let mut events = store.subscribe();
    let provider = MockEmbeddingProvider::with_dimensions(64);

    let alice = store
        .create_node("person", data_map([("name", "alice")]), "alice, systems blogger", &provider)
        .await?;
    let bob = store
        .create_node("person", data_map([("name", "bob")]), "bob, food blogger", &provider)
        .await?;

    let post = store
        .create_node(
            "post",
            data_map([
                ("title", FieldValue::from("Graphs in Rust")),
                ("author", alice.id.as_str().into()),
                ("tags", vec!["rust", "graphs"].into()),
            ]),
            "an article about graph data structures in rust",
            &provider,
        )
        .await?;

    store.add_edge(Edge::new("follows", bob.id.as_str(), alice.id.as_str(), DataMap::new()))?;

    // Derived relationships: author field referencing alice's id becomes a
    // property_reference soft link.
    SimilarityLinker::new().refresh(&mut store);
    for link in store.soft_links() {
        println!(
            "soft link {} -> {} ({:?})",
            link.source_id, link.target_id, link.reason
        );
    }

    // Who wrote posts tagged "rust"?
    let engine = QueryEngine::from_store(&store);
    let solutions = engine.query(
        &Pattern::new()
            .with("type", "post")
            .with("tags", "rust")
            .with_variable("author", "Author"),
    );
    for bindings in &solutions {
        println!("rust post by {}", bindings["Author"]);
    }
    assert_eq!(solutions[0]["Author"].as_str(), Some(alice.id.as_str()));
    assert_eq!(post.node_type, "post");

    while let Ok(event) = events.try_recv() {
        println!("event: {}", event.event_type());
    }

    Ok(())
}
