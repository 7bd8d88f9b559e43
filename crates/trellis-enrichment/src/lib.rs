//! # trellis-enrichment
//!
//! Infrastructure layer for graph enrichment: embedding provider
//! implementations and the similarity linker that derives soft links from
//! stored nodes. `trellis-core` defines the [`EmbeddingProvider`] trait;
//! this crate provides the implementations, so core stays free of provider
//! concerns.
//!
//! [`EmbeddingProvider`]: trellis_core::embedding::EmbeddingProvider

pub mod linker;
pub mod provider;
pub mod similarity;

pub use linker::{SimilarityLinker, DEFAULT_SIMILARITY_THRESHOLD};
pub use provider::{FailingProvider, MockEmbeddingProvider, DEFAULT_DIMENSIONS};
pub use similarity::cosine_similarity;
