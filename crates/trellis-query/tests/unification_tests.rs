//! Integration tests resolving patterns against facts projected from a
//! live store, including caller-side multi-hop chaining.

use trellis_core::graph::{Edge, GraphStore, Node};
use trellis_core::value::{data_map, DataMap, FieldValue};
use trellis_query::{Fact, Pattern, QueryEngine};

fn blog_store() -> GraphStore {
    let mut store = GraphStore::new();
    store
        .add_node(Node::new("person", data_map([("name", "alice")])).with_id("alice"))
        .unwrap();
    store
        .add_node(Node::new("person", data_map([("name", "bob")])).with_id("bob"))
        .unwrap();
    store
        .add_node(
            Node::new(
                "post",
                data_map([
                    ("author", FieldValue::from("alice")),
                    ("tags", FieldValue::from(vec!["rust", "graphs"])),
                ]),
            )
            .with_id("post-1"),
        )
        .unwrap();
    store
        .add_node(
            Node::new(
                "post",
                data_map([
                    ("author", FieldValue::from("bob")),
                    ("tags", FieldValue::from(vec!["cooking"])),
                ]),
            )
            .with_id("post-2"),
        )
        .unwrap();
    store
        .add_edge(Edge::new("follows", "bob", "alice", DataMap::new()).with_id("f1"))
        .unwrap();
    store
}

#[test]
fn post_author_pattern_yields_one_binding_per_post() {
    let engine = QueryEngine::from_store(&blog_store());
    let pattern = Pattern::new()
        .with("type", "post")
        .with_variable("author", "X");

    let solutions = engine.query(&pattern);
    assert_eq!(solutions.len(), 2);
    assert_eq!(solutions[0]["X"].as_str(), Some("alice"));
    assert_eq!(solutions[1]["X"].as_str(), Some("bob"));
}

#[test]
fn edge_facts_expose_source_and_target() {
    let engine = QueryEngine::from_store(&blog_store());
    let pattern = Pattern::new()
        .with("type", "follows")
        .with_variable("source", "Follower")
        .with_variable("target", "Followed");

    let solutions = engine.query(&pattern);
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0]["Follower"].as_str(), Some("bob"));
    assert_eq!(solutions[0]["Followed"].as_str(), Some("alice"));
}

#[test]
fn array_fields_expand_one_solution_per_tag() {
    let engine = QueryEngine::from_store(&blog_store());
    let pattern = Pattern::new()
        .with("type", "post")
        .with_variable("tags", "Tag");

    let tags: Vec<_> = engine
        .query(&pattern)
        .into_iter()
        .map(|s| s["Tag"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(tags, vec!["rust", "graphs", "cooking"]);
}

#[test]
fn multi_hop_composition_is_the_callers_job() {
    let engine = QueryEngine::from_store(&blog_store());

    // Hop 1: who does bob follow?
    let followed = engine.query(
        &Pattern::new()
            .with("type", "follows")
            .with("source", "bob")
            .with_variable("target", "Who"),
    );
    assert_eq!(followed.len(), 1);
    let who = followed[0]["Who"].clone();

    // Hop 2: feed the binding into the next pattern by hand.
    let posts = engine.query(
        &Pattern::new()
            .with("type", "post")
            .with("author", who)
            .with_variable("id", "Post"),
    );
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["Post"].as_str(), Some("post-1"));
}

#[test]
fn engine_reads_a_snapshot_not_the_live_store() {
    let mut store = blog_store();
    let engine = QueryEngine::from_store(&store);
    let before = engine.query(&Pattern::new().with("type", "post")).len();

    store.delete_node("post-1");

    // The engine's fact list was projected at construction time.
    assert_eq!(
        engine.query(&Pattern::new().with("type", "post")).len(),
        before
    );
    assert_eq!(
        QueryEngine::from_store(&store)
            .query(&Pattern::new().with("type", "post"))
            .len(),
        before - 1
    );
}

#[test]
fn facts_loaded_independently_of_a_store() {
    let engine = QueryEngine::new(vec![
        Fact::from(data_map([("type", "post"), ("author", "alice")])),
        Fact::from(data_map([("type", "post"), ("author", "bob")])),
    ]);

    let solutions = engine.query(&Pattern::new().with("type", "post").with_variable("author", "X"));
    assert_eq!(solutions.len(), 2);
}
