//! Similarity linker: derives soft links from the store's current nodes.
//!
//! Two independent discovery passes, recomputed wholesale on each run:
//! cosine similarity over every unordered pair of embedded nodes, and a
//! data-driven scan for string fields holding another node's id. Quadratic
//! in node count for the first pass, linear in nodes times fields for the
//! second, which is fine for client-held working sets.

use crate::similarity::cosine_similarity;
use tracing::debug;
use trellis_core::graph::{GraphStore, SoftLink};
use trellis_core::value::FieldValue;

/// Default cosine similarity threshold for a soft link.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.9;

/// Derives undirected soft relationships between stored nodes.
#[derive(Debug, Clone)]
pub struct SimilarityLinker {
    threshold: f32,
}

impl Default for SimilarityLinker {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityLinker {
    /// Linker with the default 0.9 threshold.
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    /// Linker with a caller-chosen similarity threshold.
    pub fn with_threshold(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Recompute the entire soft-link list from scratch.
    ///
    /// Pass 1: every unordered pair of nodes that both carry an embedding,
    /// linked with reason `similarity` when cosine similarity exceeds the
    /// threshold. Pass 2: every scalar string field equal to some other
    /// node's id, linked with reason `property_reference` and the field
    /// name. Soft links are never treated as explicit edges.
    pub fn generate_soft_links(&self, store: &GraphStore) -> Vec<SoftLink> {
        let nodes = store.nodes();
        let mut links = Vec::new();

        for (i, a) in nodes.iter().enumerate() {
            let Some(embedding_a) = &a.embedding else {
                continue;
            };
            for b in &nodes[i + 1..] {
                let Some(embedding_b) = &b.embedding else {
                    continue;
                };
                let score = cosine_similarity(embedding_a, embedding_b);
                if score > self.threshold {
                    links.push(SoftLink::similarity(&a.id, &b.id, score));
                }
            }
        }

        for node in nodes {
            for (field, value) in &node.data {
                let FieldValue::String(candidate) = value else {
                    continue;
                };
                if candidate == &node.id {
                    continue;
                }
                if nodes.iter().any(|other| &other.id == candidate) {
                    links.push(SoftLink::property_reference(&node.id, candidate, field));
                }
            }
        }

        debug!(count = links.len(), threshold = %self.threshold, "soft links generated");
        links
    }

    /// Recompute and write the list back into the store.
    pub fn refresh(&self, store: &mut GraphStore) {
        let links = self.generate_soft_links(store);
        store.set_soft_links(links);
    }
}
