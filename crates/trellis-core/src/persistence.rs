//! Snapshot persistence.
//!
//! The store serializes its full contents as one blob under a fixed key in
//! an injected key-value collaborator. The blob format is serde_json; the
//! collaborator is opaque get/set, so the store has no on-disk format of
//! its own. `load()` on an absent key yields an empty graph, not an error.

use crate::error::{GraphError, GraphResult};
use crate::graph::node::{Edge, Node, SoftLink};
use crate::graph::GraphStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Key under which the snapshot blob is stored.
pub const SNAPSHOT_KEY: &str = "trellis:graph";

/// Opaque key-value persistence collaborator.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Fetch a blob, or `None` when the key is absent.
    async fn get(&self, key: &str) -> GraphResult<Option<Vec<u8>>>;

    /// Store a blob under the key, replacing any previous value.
    async fn set(&self, key: &str, blob: Vec<u8>) -> GraphResult<()>;
}

/// Serialized form of a store's full contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphSnapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(default)]
    soft_links: Vec<SoftLink>,
}

impl GraphStore {
    /// Serialize the full node, edge, and soft-link collections into the
    /// collaborator under [`SNAPSHOT_KEY`].
    pub async fn save(&self, store: &dyn SnapshotStore) -> GraphResult<()> {
        let snapshot = GraphSnapshot {
            nodes: self.nodes().to_vec(),
            edges: self.edges().to_vec(),
            soft_links: self.soft_links().to_vec(),
        };
        let blob = serde_json::to_vec(&snapshot)
            .map_err(|e| GraphError::Serialization(e.to_string()))?;
        debug!(bytes = blob.len(), "saving graph snapshot");
        store.set(SNAPSHOT_KEY, blob).await
    }

    /// Replace this store's contents with the snapshot under
    /// [`SNAPSHOT_KEY`]. An absent key loads an empty graph.
    pub async fn load(&mut self, store: &dyn SnapshotStore) -> GraphResult<()> {
        let snapshot = match store.get(SNAPSHOT_KEY).await? {
            Some(blob) => serde_json::from_slice::<GraphSnapshot>(&blob)
                .map_err(|e| GraphError::Serialization(e.to_string()))?,
            None => {
                debug!("no snapshot present, loading empty graph");
                GraphSnapshot {
                    nodes: Vec::new(),
                    edges: Vec::new(),
                    soft_links: Vec::new(),
                }
            }
        };
        self.restore(snapshot.nodes, snapshot.edges, snapshot.soft_links);
        Ok(())
    }
}

/// In-memory snapshot store, for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self, key: &str) -> GraphResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|e| GraphError::Backend(e.to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: Vec<u8>) -> GraphResult<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| GraphError::Backend(e.to_string()))?;
        blobs.insert(key.to_string(), blob);
        Ok(())
    }
}

/// Snapshot store backed by one file per key in a directory.
#[derive(Debug)]
pub struct FileSnapshotStore {
    directory: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys contain ':' which some filesystems dislike.
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.directory.join(format!("{file_name}.json"))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get(&self, key: &str) -> GraphResult<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GraphError::Backend(e.to_string())),
        }
    }

    async fn set(&self, key: &str, blob: Vec<u8>) -> GraphResult<()> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| GraphError::Backend(e.to_string()))?;
        tokio::fs::write(self.path_for(key), blob)
            .await
            .map_err(|e| GraphError::Backend(e.to_string()))
    }
}
