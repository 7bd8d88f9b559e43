//! Graph entities: nodes, edges, and derived soft links.

use crate::value::DataMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A typed entity in the graph.
///
/// Owned exclusively by one [`GraphStore`](crate::graph::GraphStore) for its
/// lifetime; nothing outside the store mutates a stored node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, caller- or store-generated.
    pub id: String,

    /// Name of the [`NodeTypeConfig`](crate::schema::NodeTypeConfig) this
    /// node instantiates.
    #[serde(rename = "type")]
    pub node_type: String,

    /// Field map, validated against the schema on insertion.
    #[serde(default)]
    pub data: DataMap,

    /// Fixed-length embedding vector, when the node has been enriched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Create a node with a generated id and fresh timestamps.
    pub fn new(node_type: impl Into<String>, data: DataMap) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            node_type: node_type.into(),
            data,
            embedding: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Use a caller-chosen id instead of the generated one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach an embedding vector.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// A directed, typed relationship between two stored nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier, caller- or store-generated.
    pub id: String,

    /// Name of the [`EdgeTypeConfig`](crate::schema::EdgeTypeConfig) this
    /// edge instantiates.
    #[serde(rename = "type")]
    pub edge_type: String,

    /// Id of the node this edge leaves from.
    pub source_node_id: String,

    /// Id of the node this edge points at.
    pub target_node_id: String,

    /// Field map, validated against the schema on insertion.
    #[serde(default)]
    pub data: DataMap,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Edge {
    /// Create an edge with a generated id and fresh timestamps.
    pub fn new(
        edge_type: impl Into<String>,
        source_node_id: impl Into<String>,
        target_node_id: impl Into<String>,
        data: DataMap,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            edge_type: edge_type.into(),
            source_node_id: source_node_id.into(),
            target_node_id: target_node_id.into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Use a caller-chosen id instead of the generated one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether either endpoint is the given node.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_node_id == node_id || self.target_node_id == node_id
    }
}

/// Why a soft link was inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftLinkReason {
    /// Embedding cosine similarity above threshold.
    Similarity,
    /// A string field holding another node's id.
    PropertyReference,
}

/// A derived, non-authoritative relationship between two nodes.
///
/// Soft links are recomputed wholesale by the similarity linker, never
/// mutated individually, and never count toward schema or cardinality
/// checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftLink {
    pub source_id: String,
    pub target_id: String,

    /// Always `"soft"`; distinguishes these from explicit edges in
    /// serialized snapshots.
    #[serde(default = "SoftLink::kind")]
    pub kind: String,

    pub reason: SoftLinkReason,

    /// Cosine similarity score, for [`SoftLinkReason::Similarity`] links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,

    /// Referencing field name, for [`SoftLinkReason::PropertyReference`]
    /// links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl SoftLink {
    fn kind() -> String {
        "soft".to_string()
    }

    /// Link inferred from embedding similarity.
    pub fn similarity(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        score: f32,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: Self::kind(),
            reason: SoftLinkReason::Similarity,
            score: Some(score),
            property: None,
        }
    }

    /// Link inferred from a string field referencing another node's id.
    pub fn property_reference(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: Self::kind(),
            reason: SoftLinkReason::PropertyReference,
            score: None,
            property: Some(property.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::data_map;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Node::new("person", DataMap::new());
        let b = Node::new("person", DataMap::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_edge_touches_either_endpoint() {
        let edge = Edge::new("manages", "a", "b", DataMap::new());
        assert!(edge.touches("a"));
        assert!(edge.touches("b"));
        assert!(!edge.touches("c"));
    }

    #[test]
    fn test_node_serializes_type_under_canonical_key() {
        let node = Node::new("person", data_map([("name", "alice")])).with_id("n1");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "person");
        assert_eq!(json["data"]["name"], "alice");
    }

    #[test]
    fn test_soft_link_kind_is_soft() {
        let link = SoftLink::similarity("a", "b", 0.95);
        assert_eq!(link.kind, "soft");
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["reason"], "similarity");
    }
}
