//! Change notifications for graph mutations.
//!
//! Mutations publish typed [`GraphEvent`]s onto a broadcast channel in the
//! order the operations occur. Subscribers are independent tasks holding a
//! [`broadcast::Receiver`]; a slow or dropped receiver never fails the
//! mutation that published the event, and a subscriber cannot corrupt store
//! state because it never runs inside the mutating call.

use crate::graph::node::{Edge, Node};
use crate::value::DataMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default capacity of the event channel.
///
/// Receivers that fall further behind than this observe a `Lagged` error
/// from the channel rather than blocking the store.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Partial update applied to a node via
/// [`GraphStore::update_node`](crate::graph::GraphStore::update_node).
///
/// `id` and `type` are deliberately unrepresentable here: they are never
/// mutable after insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    /// Fields to merge into the node's data map, key by key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataMap>,

    /// Replacement embedding vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl NodeUpdate {
    pub fn data(data: DataMap) -> Self {
        Self {
            data: Some(data),
            embedding: None,
        }
    }

    pub fn embedding(embedding: Vec<f32>) -> Self {
        Self {
            data: None,
            embedding: Some(embedding),
        }
    }
}

/// Partial update applied to an edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeUpdate {
    /// Fields to merge into the edge's data map, key by key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataMap>,
}

impl EdgeUpdate {
    pub fn data(data: DataMap) -> Self {
        Self { data: Some(data) }
    }
}

/// Every change notification a store can publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GraphEvent {
    /// A node passed validation and was stored.
    NodeAdded { node: Node },

    /// A node was updated; carries the node after the merge and the
    /// changes that were applied.
    NodeUpdated { node: Node, changes: NodeUpdate },

    /// A node was removed. Fires after the cascade's `EdgeDeleted` events.
    NodeDeleted { node: Node },

    /// An edge passed validation and was stored.
    EdgeAdded { edge: Edge },

    /// An edge was updated; carries the edge after the merge and the
    /// changes that were applied.
    EdgeUpdated { edge: Edge, changes: EdgeUpdate },

    /// An edge was removed, explicitly or by cascade.
    EdgeDeleted { edge: Edge },

    /// Both collections and the soft-link list were emptied.
    Cleared,
}

impl GraphEvent {
    /// Canonical event name, for logging and filtering.
    pub fn event_type(&self) -> &'static str {
        match self {
            GraphEvent::NodeAdded { .. } => "node:add",
            GraphEvent::NodeUpdated { .. } => "node:update",
            GraphEvent::NodeDeleted { .. } => "node:delete",
            GraphEvent::EdgeAdded { .. } => "edge:add",
            GraphEvent::EdgeUpdated { .. } => "edge:update",
            GraphEvent::EdgeDeleted { .. } => "edge:delete",
            GraphEvent::Cleared => "graph:clear",
        }
    }

    /// Whether this event concerns a node.
    pub fn is_node_event(&self) -> bool {
        matches!(
            self,
            GraphEvent::NodeAdded { .. }
                | GraphEvent::NodeUpdated { .. }
                | GraphEvent::NodeDeleted { .. }
        )
    }

    /// Whether this event concerns an edge.
    pub fn is_edge_event(&self) -> bool {
        matches!(
            self,
            GraphEvent::EdgeAdded { .. }
                | GraphEvent::EdgeUpdated { .. }
                | GraphEvent::EdgeDeleted { .. }
        )
    }
}

/// Publisher half of the event channel, owned by the store.
#[derive(Debug, Clone)]
pub(crate) struct EventPublisher {
    sender: broadcast::Sender<GraphEvent>,
}

impl EventPublisher {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<GraphEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Having no live subscribers is not an error.
    pub(crate) fn publish(&self, event: GraphEvent) {
        tracing::debug!(event = event.event_type(), "graph event");
        let _ = self.sender.send(event);
    }
}
