//! End-to-end enrichment tests: embedding via provider, then soft-link
//! discovery over the store's live node set.

use trellis_core::graph::{GraphStore, Node, SoftLinkReason};
use trellis_core::value::{data_map, DataMap};
use trellis_enrichment::{cosine_similarity, MockEmbeddingProvider, SimilarityLinker};

#[tokio::test]
async fn identical_text_nodes_end_up_soft_linked() {
    let mut store = GraphStore::new();
    let provider = MockEmbeddingProvider::with_dimensions(64);

    store
        .create_node("doc", DataMap::new(), "rust graph stores", &provider)
        .await
        .unwrap();
    store
        .create_node("doc", DataMap::new(), "rust graph stores", &provider)
        .await
        .unwrap();
    store
        .create_node("doc", DataMap::new(), "completely different topic", &provider)
        .await
        .unwrap();

    let linker = SimilarityLinker::new();
    linker.refresh(&mut store);

    // Identical text embeds to the identical vector: similarity 1.0.
    let similarity_links: Vec<_> = store
        .soft_links()
        .iter()
        .filter(|l| l.reason == SoftLinkReason::Similarity)
        .collect();
    assert_eq!(similarity_links.len(), 1);
    assert!(similarity_links[0].score.unwrap() > 0.99);
}

#[tokio::test]
async fn recompute_is_wholesale_not_incremental() {
    let mut store = GraphStore::new();
    let provider = MockEmbeddingProvider::with_dimensions(32);

    let first = store
        .create_node("doc", DataMap::new(), "same text", &provider)
        .await
        .unwrap();
    store
        .create_node("doc", DataMap::new(), "same text", &provider)
        .await
        .unwrap();

    let linker = SimilarityLinker::new();
    linker.refresh(&mut store);
    assert_eq!(store.soft_links().len(), 1);

    // Removing one endpoint and rerunning leaves no stale links behind.
    store.delete_node(&first.id);
    linker.refresh(&mut store);
    assert!(store.soft_links().is_empty());
}

#[test]
fn property_references_and_similarity_are_independent_passes() {
    let mut store = GraphStore::new();
    store
        .add_node(Node::new("person", DataMap::new()).with_id("alice"))
        .unwrap();
    store
        .add_node(
            Node::new("post", data_map([("author", "alice")]))
                .with_id("post-1")
                .with_embedding(vec![1.0, 0.0]),
        )
        .unwrap();
    store
        .add_node(
            Node::new("post", data_map([("author", "alice")]))
                .with_id("post-2")
                .with_embedding(vec![1.0, 0.0]),
        )
        .unwrap();

    let links = SimilarityLinker::new().generate_soft_links(&store);

    let similarity = links
        .iter()
        .filter(|l| l.reason == SoftLinkReason::Similarity)
        .count();
    let references = links
        .iter()
        .filter(|l| l.reason == SoftLinkReason::PropertyReference)
        .count();
    assert_eq!(similarity, 1);
    assert_eq!(references, 2);
}

#[test]
fn soft_links_never_count_as_edges() {
    let mut store = GraphStore::new();
    store
        .add_node(Node::new("doc", DataMap::new()).with_id("a").with_embedding(vec![1.0]))
        .unwrap();
    store
        .add_node(Node::new("doc", DataMap::new()).with_id("b").with_embedding(vec![1.0]))
        .unwrap();

    SimilarityLinker::new().refresh(&mut store);
    assert_eq!(store.soft_links().len(), 1);
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn cosine_properties_hold() {
    let a = vec![0.2, -0.7, 1.3];
    let b = vec![0.9, 0.1, -0.4];
    assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
}
