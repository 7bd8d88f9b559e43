//! Embedding provider abstraction.
//!
//! Core defines the trait; concrete providers live in the
//! `trellis-enrichment` crate. The store only ever sees this abstraction,
//! so providers can be swapped without touching graph code.

use async_trait::async_trait;
use thiserror::Error;

/// Error type for embedding operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    #[error("provider error: {0}")]
    Provider(String),

    #[error("cannot embed empty text")]
    EmptyText,

    #[error("provider returned {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Reduces arbitrary text to a fixed-length numeric vector.
///
/// Contract: `embed` returns a vector of exactly `dimensions()` floats for
/// any non-empty string. The embedding call is the only asynchronous
/// boundary in the core; its timeout and cancellation policy belong to the
/// implementation.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for the given text.
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Fixed dimensionality of every vector this provider returns.
    fn dimensions(&self) -> usize;

    /// Provider name, for logging.
    fn name(&self) -> &str;
}

/// Deterministic, dimension-matching fallback vector.
///
/// Used when a provider fails, so embedding failures never block node
/// creation. Seeded from an FNV-1a hash of the text and expanded with a
/// splitmix64 stream, then unit-normalized; the same text always yields the
/// same vector, and distinct texts overwhelmingly yield distinct ones.
pub fn fallback_embedding(text: &str, dimensions: usize) -> Vec<f32> {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut seed = FNV_OFFSET;
    for byte in text.as_bytes() {
        seed ^= u64::from(*byte);
        seed = seed.wrapping_mul(FNV_PRIME);
    }

    let mut state = seed;
    let mut vector: Vec<f32> = (0..dimensions)
        .map(|_| {
            state = splitmix64(state);
            // Map to [-1, 1).
            (state as f64 / u64::MAX as f64).mul_add(2.0, -1.0) as f32
        })
        .collect();

    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vector {
            *value /= norm;
        }
    }
    vector
}

fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_deterministic() {
        let a = fallback_embedding("hello", 8);
        let b = fallback_embedding("hello", 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_matches_requested_dimensions() {
        assert_eq!(fallback_embedding("hello", 384).len(), 384);
        assert_eq!(fallback_embedding("hello", 3).len(), 3);
    }

    #[test]
    fn test_fallback_distinguishes_texts() {
        assert_ne!(fallback_embedding("hello", 8), fallback_embedding("world", 8));
    }

    #[test]
    fn test_fallback_is_unit_normalized() {
        let vector = fallback_embedding("hello", 16);
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
