//! Offline index building: embed chunks and upsert them in batches
//!
//! Failures degrade gracefully: a chunk that will not embed is skipped and
//! counted, a batch that will not upsert is persisted to disk for manual
//! retry, and the run always continues. Deterministic vector ids make the
//! whole build re-runnable; re-upserting an unchanged chunk overwrites its
//! record with identical content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::IndexingConfig;
use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorIndexProvider};
use crate::types::{Chunk, VectorRecord};

/// Outcome of one index build run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexReport {
    /// Chunks considered (empty-content chunks excluded)
    pub attempted: usize,
    /// Chunks successfully embedded
    pub embedded: usize,
    /// Chunks skipped because their embedding call failed
    pub skipped_embedding: usize,
    /// Vectors successfully upserted
    pub upserted: usize,
    /// Batches that failed to upsert and were persisted for retry
    pub failed_batches: usize,
}

/// A persisted failed upsert batch, shaped for retry tooling
#[derive(Debug, Serialize, Deserialize)]
pub struct FailedBatch {
    /// Zero-based batch number within the run
    pub batch_id: usize,
    /// Why the upsert failed
    pub cause: String,
    /// When the failure happened
    pub failed_at: DateTime<Utc>,
    /// The records that were not upserted
    pub records: Vec<VectorRecord>,
}

/// Turns segmented chunks into embedded vectors in the external index
pub struct ChunkStoreBuilder {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
    namespace: String,
    batch_size: usize,
    failed_batch_dir: PathBuf,
}

impl ChunkStoreBuilder {
    /// Create a builder over the given providers
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
        namespace: impl Into<String>,
        config: &IndexingConfig,
    ) -> Self {
        Self {
            embedder,
            index,
            namespace: namespace.into(),
            batch_size: config.batch_size.max(1),
            failed_batch_dir: config.failed_batch_dir.clone(),
        }
    }

    /// Embed and upsert a chunk set, reporting partial progress
    pub async fn build(&self, chunks: &[Chunk]) -> Result<IndexReport> {
        let mut report = IndexReport::default();
        let mut records = Vec::new();

        for chunk in chunks {
            if chunk.content.trim().is_empty() {
                continue;
            }
            report.attempted += 1;

            match self.embedder.embed(chunk.content.trim()).await {
                Ok(values) => {
                    // A wrong-length vector is configuration drift, not a
                    // per-chunk hiccup: every subsequent upsert would be
                    // rejected or, worse, indexed as nonsense. Fail the run.
                    if values.len() != self.embedder.dimensions() {
                        return Err(Error::embedding(format!(
                            "chunk {} embedded to {} dimensions, expected {}",
                            chunk.vector_id(),
                            values.len(),
                            self.embedder.dimensions()
                        )));
                    }
                    report.embedded += 1;
                    records.push(VectorRecord {
                        id: chunk.vector_id(),
                        values,
                        metadata: chunk.to_metadata(),
                    });
                }
                Err(e) => {
                    report.skipped_embedding += 1;
                    tracing::warn!(
                        chunk = %chunk.vector_id(),
                        provider = self.embedder.name(),
                        "failed to embed chunk, skipping: {}",
                        e
                    );
                }
            }
        }

        tracing::info!(
            embedded = report.embedded,
            skipped = report.skipped_embedding,
            "embedding pass complete, upserting {} vectors in batches of {}",
            records.len(),
            self.batch_size
        );

        for (batch_id, batch) in records.chunks(self.batch_size).enumerate() {
            match self.index.upsert(&self.namespace, batch).await {
                Ok(()) => report.upserted += batch.len(),
                Err(e) => {
                    report.failed_batches += 1;
                    tracing::warn!(
                        batch_id,
                        provider = self.index.name(),
                        "batch upsert failed, persisting for retry: {}",
                        e
                    );
                    if let Err(persist_err) = self.persist_failed_batch(batch_id, &e.to_string(), batch) {
                        tracing::error!(batch_id, "could not persist failed batch: {}", persist_err);
                    }
                }
            }
        }

        tracing::info!(
            upserted = report.upserted,
            failed_batches = report.failed_batches,
            "index build complete"
        );

        Ok(report)
    }

    fn persist_failed_batch(
        &self,
        batch_id: usize,
        cause: &str,
        records: &[VectorRecord],
    ) -> Result<()> {
        std::fs::create_dir_all(&self.failed_batch_dir)?;

        let failed = FailedBatch {
            batch_id,
            cause: cause.to_string(),
            failed_at: Utc::now(),
            records: records.to_vec(),
        };

        let path = self
            .failed_batch_dir
            .join(format!("failed_batch_{}.json", batch_id));
        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, &failed)?;

        tracing::info!(path = %path.display(), "persisted failed batch");
        Ok(())
    }
}
