//! The graph store: owned collections, invariant enforcement, events.
//!
//! One store instance exclusively owns its node and edge collections. Every
//! mutation is validated before anything changes, so a rejected call leaves
//! the store exactly as it was. Collections are plain vectors in insertion
//! order; lookups and cardinality checks are linear scans, which is the
//! intended cost model for client-held working sets.

use crate::embedding::{fallback_embedding, EmbeddingProvider};
use crate::error::{ConnectionSide, GraphError, GraphResult, SchemaError};
use crate::graph::events::{
    EdgeUpdate, EventPublisher, GraphEvent, NodeUpdate, EVENT_CHANNEL_CAPACITY,
};
use crate::graph::node::{Edge, Node, SoftLink};
use crate::graph::validation::validate_data;
use crate::schema::{validate_schema, Schema};
use crate::value::DataMap;
use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// In-memory, schema-governed graph store.
///
/// Construct with [`GraphStore::new`] for a schema-less store or
/// [`GraphStore::with_schema`] to have every mutation validated. The store
/// implements no locking of its own; hosts embedding it in a multithreaded
/// context serialize mutations externally.
#[derive(Debug)]
pub struct GraphStore {
    schema: Option<Schema>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    soft_links: Vec<SoftLink>,
    events: EventPublisher,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// An empty store with no schema. Every well-formed node or edge is
    /// accepted.
    pub fn new() -> Self {
        Self {
            schema: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            soft_links: Vec::new(),
            events: EventPublisher::new(EVENT_CHANNEL_CAPACITY),
        }
    }

    /// An empty store governed by `schema`.
    ///
    /// The schema is validated first; an invalid schema means no store.
    pub fn with_schema(schema: Schema) -> Result<Self, SchemaError> {
        validate_schema(&schema)?;
        Ok(Self {
            schema: Some(schema),
            ..Self::new()
        })
    }

    /// The active schema, if any.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Subscribe to change notifications.
    ///
    /// Events arrive in the order mutations occur. The receiver observes a
    /// `Lagged` error if it falls further behind than the channel capacity.
    pub fn subscribe(&self) -> broadcast::Receiver<GraphEvent> {
        self.events.subscribe()
    }

    // ────────────────────────────────────────────────────────────────────
    // Accessors
    // ────────────────────────────────────────────────────────────────────

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The derived soft-link list from the most recent linker run.
    pub fn soft_links(&self) -> &[SoftLink] {
        &self.soft_links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ────────────────────────────────────────────────────────────────────
    // Node CRUD
    // ────────────────────────────────────────────────────────────────────

    /// Insert a node.
    ///
    /// Fails on a duplicate id and, when a schema is active, on an
    /// undeclared type or any field validation failure. On success the node
    /// is stored and a `node:add` event is published.
    pub fn add_node(&mut self, node: Node) -> GraphResult<()> {
        if self.node(&node.id).is_some() {
            return Err(GraphError::DuplicateId {
                id: node.id.clone(),
            });
        }

        if let Some(schema) = &self.schema {
            let config = schema.node_type(&node.node_type).ok_or_else(|| {
                GraphError::UnknownType {
                    type_name: node.node_type.clone(),
                }
            })?;
            validate_data(&node.node_type, &config.data, &node.data)?;
        }

        debug!(id = %node.id, node_type = %node.node_type, "node added");
        self.nodes.push(node.clone());
        self.events.publish(GraphEvent::NodeAdded { node });
        Ok(())
    }

    /// Create a node via the embedding factory.
    ///
    /// Requests an embedding for `text` from the provider; a provider
    /// failure falls back to a deterministic, dimension-matching vector so
    /// embedding failures never block node creation. The stored node is
    /// returned.
    pub async fn create_node(
        &mut self,
        node_type: impl Into<String>,
        data: DataMap,
        text: &str,
        provider: &dyn EmbeddingProvider,
    ) -> GraphResult<Node> {
        let embedding = match provider.embed(text).await {
            Ok(vector) => vector,
            Err(error) => {
                warn!(%error, provider = provider.name(), "embedding failed, using fallback");
                fallback_embedding(text, provider.dimensions())
            }
        };

        let node = Node::new(node_type, data).with_embedding(embedding);
        self.add_node(node.clone())?;
        Ok(node)
    }

    /// Apply a partial update to a node.
    ///
    /// A silent no-op when the id is absent, returning `None`. Otherwise
    /// merges `changes.data` into the node's data map key by key, replaces
    /// the embedding when one is given, refreshes `updated_at`, publishes
    /// `node:update`, and returns the updated node. `id` and `type` are
    /// never mutable.
    ///
    /// Merged fields are not re-validated against the schema; insertion is
    /// the only gated path.
    pub fn update_node(&mut self, id: &str, changes: NodeUpdate) -> Option<Node> {
        let node = self.nodes.iter_mut().find(|n| n.id == id)?;

        if let Some(data) = &changes.data {
            for (field, value) in data {
                node.data.insert(field.clone(), value.clone());
            }
        }
        if let Some(embedding) = &changes.embedding {
            node.embedding = Some(embedding.clone());
        }
        node.updated_at = Utc::now();

        let updated = node.clone();
        debug!(id = %updated.id, "node updated");
        self.events.publish(GraphEvent::NodeUpdated {
            node: updated.clone(),
            changes,
        });
        Some(updated)
    }

    /// Delete a node and cascade to its incident edges.
    ///
    /// A silent no-op when the id is absent, returning `false`. Otherwise
    /// removes the node, removes every edge whose source or target is the
    /// node, publishes one `edge:delete` per removed edge followed by a
    /// single `node:delete`, and returns `true`.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let Some(position) = self.nodes.iter().position(|n| n.id == id) else {
            return false;
        };
        let node = self.nodes.remove(position);

        let mut removed_edges = Vec::new();
        self.edges.retain(|edge| {
            if edge.touches(id) {
                removed_edges.push(edge.clone());
                false
            } else {
                true
            }
        });

        debug!(
            id = %node.id,
            cascaded = removed_edges.len(),
            "node deleted"
        );
        for edge in removed_edges {
            self.events.publish(GraphEvent::EdgeDeleted { edge });
        }
        self.events.publish(GraphEvent::NodeDeleted { node });
        true
    }

    // ────────────────────────────────────────────────────────────────────
    // Edge CRUD
    // ────────────────────────────────────────────────────────────────────

    /// Insert an edge.
    ///
    /// Fails on a duplicate id or a missing endpoint node and, when a
    /// schema is active, on an undeclared type, a field validation
    /// failure, an endpoint whose node type disagrees with the edge type's
    /// declaration, or a cardinality violation. On success the edge is
    /// stored and an `edge:add` event is published.
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if self.edge(&edge.id).is_some() {
            return Err(GraphError::DuplicateId {
                id: edge.id.clone(),
            });
        }

        let source = self.node(&edge.source_node_id).ok_or_else(|| {
            GraphError::MissingEndpoint {
                edge_id: edge.id.clone(),
                node_id: edge.source_node_id.clone(),
            }
        })?;
        let target = self.node(&edge.target_node_id).ok_or_else(|| {
            GraphError::MissingEndpoint {
                edge_id: edge.id.clone(),
                node_id: edge.target_node_id.clone(),
            }
        })?;

        if let Some(schema) = &self.schema {
            let config = schema.edge_type(&edge.edge_type).ok_or_else(|| {
                GraphError::UnknownType {
                    type_name: edge.edge_type.clone(),
                }
            })?;
            validate_data(&edge.edge_type, &config.data, &edge.data)?;

            for (side, connection, endpoint) in [
                (ConnectionSide::Source, &config.source, source),
                (ConnectionSide::Target, &config.target, target),
            ] {
                if endpoint.node_type != connection.node_type {
                    return Err(GraphError::EndpointTypeMismatch {
                        edge_type: edge.edge_type.clone(),
                        side,
                        expected: connection.node_type.clone(),
                        actual: endpoint.node_type.clone(),
                    });
                }
            }

            // Append-only linear scan over existing edges of the same type.
            if !config.source.multiple
                && self.edges.iter().any(|existing| {
                    existing.edge_type == edge.edge_type
                        && existing.source_node_id == edge.source_node_id
                })
            {
                return Err(GraphError::CardinalityViolation {
                    edge_type: edge.edge_type.clone(),
                    side: ConnectionSide::Source,
                    node_id: edge.source_node_id.clone(),
                });
            }
            if !config.target.multiple
                && self.edges.iter().any(|existing| {
                    existing.edge_type == edge.edge_type
                        && existing.target_node_id == edge.target_node_id
                })
            {
                return Err(GraphError::CardinalityViolation {
                    edge_type: edge.edge_type.clone(),
                    side: ConnectionSide::Target,
                    node_id: edge.target_node_id.clone(),
                });
            }
        }

        debug!(id = %edge.id, edge_type = %edge.edge_type, "edge added");
        self.edges.push(edge.clone());
        self.events.publish(GraphEvent::EdgeAdded { edge });
        Ok(())
    }

    /// Apply a partial update to an edge.
    ///
    /// Same merge and no-op semantics as [`GraphStore::update_node`],
    /// including the unvalidated merge; endpoints and `type` are never
    /// mutable.
    pub fn update_edge(&mut self, id: &str, changes: EdgeUpdate) -> Option<Edge> {
        let edge = self.edges.iter_mut().find(|e| e.id == id)?;

        if let Some(data) = &changes.data {
            for (field, value) in data {
                edge.data.insert(field.clone(), value.clone());
            }
        }
        edge.updated_at = Utc::now();

        let updated = edge.clone();
        debug!(id = %updated.id, "edge updated");
        self.events.publish(GraphEvent::EdgeUpdated {
            edge: updated.clone(),
            changes,
        });
        Some(updated)
    }

    /// Delete an edge. No cascade; a silent no-op when the id is absent.
    pub fn delete_edge(&mut self, id: &str) -> bool {
        let Some(position) = self.edges.iter().position(|e| e.id == id) else {
            return false;
        };
        let edge = self.edges.remove(position);
        debug!(id = %edge.id, "edge deleted");
        self.events.publish(GraphEvent::EdgeDeleted { edge });
        true
    }

    // ────────────────────────────────────────────────────────────────────
    // Whole-store operations
    // ────────────────────────────────────────────────────────────────────

    /// Empty the node, edge, and soft-link collections and publish
    /// `graph:clear`.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.soft_links.clear();
        debug!("graph cleared");
        self.events.publish(GraphEvent::Cleared);
    }

    /// Replace the derived soft-link list wholesale.
    ///
    /// Called by the similarity linker after a recompute; soft links are
    /// never mutated individually.
    pub fn set_soft_links(&mut self, links: Vec<SoftLink>) {
        self.soft_links = links;
    }

    /// Replace the store's contents from a deserialized snapshot.
    ///
    /// Trusted path used by `load()`; snapshot contents were validated when
    /// first inserted, so they are not re-validated here.
    pub(crate) fn restore(&mut self, nodes: Vec<Node>, edges: Vec<Edge>, links: Vec<SoftLink>) {
        self.nodes = nodes;
        self.edges = edges;
        self.soft_links = links;
    }
}
