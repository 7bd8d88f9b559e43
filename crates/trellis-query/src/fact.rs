//! Facts: flattened field-map projections of nodes and edges.
//!
//! A fact is not a stored entity; it is a read-only view the query engine
//! resolves patterns against. Facts can be projected from a store or loaded
//! independently.

use std::collections::BTreeMap;
use trellis_core::graph::{Edge, GraphStore, Node};
use trellis_core::value::{DataMap, FieldValue};

/// One flattened fact record.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    fields: BTreeMap<String, FieldValue>,
}

impl Fact {
    /// A fact from raw fields.
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Project a node: its data fields plus `id` and `type`.
    ///
    /// Identifying fields are written last, so a data field that happens to
    /// be named `id` or `type` cannot shadow the node's identity.
    pub fn from_node(node: &Node) -> Self {
        let mut fields = node.data.clone();
        fields.insert("id".to_string(), FieldValue::from(node.id.as_str()));
        fields.insert("type".to_string(), FieldValue::from(node.node_type.as_str()));
        Self { fields }
    }

    /// Project an edge: its data fields plus `id`, `type`, `source`, and
    /// `target`.
    pub fn from_edge(edge: &Edge) -> Self {
        let mut fields = edge.data.clone();
        fields.insert("id".to_string(), FieldValue::from(edge.id.as_str()));
        fields.insert("type".to_string(), FieldValue::from(edge.edge_type.as_str()));
        fields.insert(
            "source".to_string(),
            FieldValue::from(edge.source_node_id.as_str()),
        );
        fields.insert(
            "target".to_string(),
            FieldValue::from(edge.target_node_id.as_str()),
        );
        Self { fields }
    }

    /// Value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<DataMap> for Fact {
    fn from(fields: DataMap) -> Self {
        Self::new(fields)
    }
}

/// Project a store's current entity set as facts: nodes first, then edges,
/// each in insertion order. This is the fact order query results follow.
pub fn facts_from_store(store: &GraphStore) -> Vec<Fact> {
    let mut facts = Vec::with_capacity(store.node_count() + store.edge_count());
    facts.extend(store.nodes().iter().map(Fact::from_node));
    facts.extend(store.edges().iter().map(Fact::from_edge));
    facts
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::value::data_map;

    #[test]
    fn test_node_projection_carries_identity() {
        let node = Node::new("post", data_map([("author", "alice")])).with_id("p1");
        let fact = Fact::from_node(&node);
        assert_eq!(fact.get("id").unwrap().as_str(), Some("p1"));
        assert_eq!(fact.get("type").unwrap().as_str(), Some("post"));
        assert_eq!(fact.get("author").unwrap().as_str(), Some("alice"));
    }

    #[test]
    fn test_identity_fields_win_over_data() {
        let node = Node::new("post", data_map([("id", "fake")])).with_id("real");
        let fact = Fact::from_node(&node);
        assert_eq!(fact.get("id").unwrap().as_str(), Some("real"));
    }

    #[test]
    fn test_edge_projection_carries_endpoints() {
        let edge = Edge::new("knows", "a", "b", DataMap::new()).with_id("e1");
        let fact = Fact::from_edge(&edge);
        assert_eq!(fact.get("source").unwrap().as_str(), Some("a"));
        assert_eq!(fact.get("target").unwrap().as_str(), Some("b"));
    }

    #[test]
    fn test_store_projection_orders_nodes_before_edges() {
        let mut store = GraphStore::new();
        store
            .add_node(Node::new("person", DataMap::new()).with_id("a"))
            .unwrap();
        store
            .add_node(Node::new("person", DataMap::new()).with_id("b"))
            .unwrap();
        store
            .add_edge(Edge::new("knows", "a", "b", DataMap::new()).with_id("e1"))
            .unwrap();

        let facts = facts_from_store(&store);
        assert_eq!(facts.len(), 3);
        assert_eq!(facts[0].get("id").unwrap().as_str(), Some("a"));
        assert_eq!(facts[1].get("id").unwrap().as_str(), Some("b"));
        assert_eq!(facts[2].get("id").unwrap().as_str(), Some("e1"));
    }
}
