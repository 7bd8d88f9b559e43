//! Embedding provider implementations.
//!
//! Real hosts inject their own [`EmbeddingProvider`]; these two cover tests
//! and offline use. The mock produces deterministic hash-seeded vectors, so
//! the same text always embeds to the same point and similarity assertions
//! stay stable across runs.

use async_trait::async_trait;
use trellis_core::embedding::{
    fallback_embedding, EmbeddingError, EmbeddingProvider, EmbeddingResult,
};

/// Default dimensionality for the mock provider.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Deterministic embedding provider.
///
/// Vectors are hash-seeded from the input text and unit-normalized; no
/// network, no model weights. Identical text yields identical vectors.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_DIMENSIONS)
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        if text.is_empty() {
            return Err(EmbeddingError::EmptyText);
        }
        Ok(fallback_embedding(text, self.dimensions))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Provider that always fails. Exercises the store's fallback path.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    dimensions: usize,
}

impl FailingProvider {
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl EmbeddingProvider for FailingProvider {
    async fn embed(&self, _text: &str) -> EmbeddingResult<Vec<f32>> {
        Err(EmbeddingError::Provider("unavailable".to_string()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "failing"
    }
}
