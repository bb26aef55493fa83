//! Vector index provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ScoredMatch, VectorRecord};

/// Trait for the external vector index (upsert + nearest-neighbor query)
///
/// The index is created ahead of time with a fixed dimensionality and
/// cosine similarity. Upserts are insert-or-update by record id, which
/// makes index builds with deterministic ids safely re-runnable.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Upsert a batch of records into a namespace
    async fn upsert(&self, namespace: &str, records: &[VectorRecord]) -> Result<()>;

    /// Query the `top_k` nearest records in a namespace, metadata included,
    /// ordered by descending relevance score
    async fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredMatch>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
