//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings
///
/// The same provider instance (same model, same dimensionality) must be
/// used at index-build time and at query time; the retriever checks vector
/// lengths against `dimensions()` to catch configuration drift.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimensionality (e.g. 1536 for text-embedding-3-small)
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}
