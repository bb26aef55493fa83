//! Query-time retrieval against the vector index

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorIndexProvider};
use crate::types::{Chunk, RetrievedMatch};

/// Embeds a query and fetches the nearest chunks from the index
///
/// Failures propagate: an embedding or index error is a retrieval failure
/// surfaced to the caller, never converted into an empty result set.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
    namespace: String,
}

impl Retriever {
    /// Create a retriever over the given providers
    ///
    /// The embedder must be the same model/dimensionality used at
    /// index-build time.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            embedder,
            index,
            namespace: namespace.into(),
        }
    }

    /// Retrieve the `top_k` most relevant chunks for a query
    ///
    /// Matches come back in the index service's own order (descending
    /// relevance score); no re-ranking is applied.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedMatch>> {
        let vector = self.embedder.embed(query).await?;

        // Dimensionality drift between build time and query time would
        // otherwise fail silently with nonsense neighbors.
        if vector.len() != self.embedder.dimensions() {
            return Err(Error::embedding(format!(
                "query embedding has {} dimensions, expected {}",
                vector.len(),
                self.embedder.dimensions()
            )));
        }

        let matches = self.index.query(&self.namespace, &vector, top_k).await?;

        tracing::debug!(
            query_len = query.len(),
            matches = matches.len(),
            provider = self.index.name(),
            "retrieved nearest chunks"
        );

        Ok(matches
            .into_iter()
            .map(|m| RetrievedMatch {
                chunk: Chunk::from_metadata(&m.metadata),
                score: m.score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::types::ScoredMatch;

    struct FixedEmbedder {
        vector: Vec<f32>,
        dimensions: usize,
    }

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.vector.clone())
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Index pre-seeded with scored matches, returned highest score first
    struct SeededIndex {
        matches: Vec<ScoredMatch>,
    }

    #[async_trait]
    impl VectorIndexProvider for SeededIndex {
        async fn upsert(
            &self,
            _namespace: &str,
            _records: &[crate::types::VectorRecord],
        ) -> Result<()> {
            Ok(())
        }

        async fn query(
            &self,
            _namespace: &str,
            _vector: &[f32],
            top_k: usize,
        ) -> Result<Vec<ScoredMatch>> {
            Ok(self.matches.iter().take(top_k).cloned().collect())
        }

        fn name(&self) -> &str {
            "seeded"
        }
    }

    struct FailingIndex;

    #[async_trait]
    impl VectorIndexProvider for FailingIndex {
        async fn upsert(
            &self,
            _namespace: &str,
            _records: &[crate::types::VectorRecord],
        ) -> Result<()> {
            Ok(())
        }

        async fn query(
            &self,
            _namespace: &str,
            _vector: &[f32],
            _top_k: usize,
        ) -> Result<Vec<ScoredMatch>> {
            Err(Error::vector_index("index unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn scored(id: &str, score: f32, section: &str) -> ScoredMatch {
        let chunk = Chunk {
            source_document: "manual.pdf".to_string(),
            section_title: section.to_string(),
            content: format!("content of {}", section),
            page_number: 1,
            ordinal: 0,
        };
        ScoredMatch {
            id: id.to_string(),
            score,
            metadata: chunk.to_metadata(),
        }
    }

    #[tokio::test]
    async fn returns_top_k_in_score_order() {
        let matches: Vec<ScoredMatch> = (0..8)
            .map(|i| scored(&format!("m-{}", i), 0.9 - 0.1 * i as f32, "1.0 Setup"))
            .collect();
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
                dimensions: 4,
            }),
            Arc::new(SeededIndex { matches }),
            "main",
        );

        let results = retriever.retrieve("anything", 5).await.unwrap();
        assert_eq!(results.len(), 5);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn metadata_round_trips_into_chunks() {
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
                dimensions: 4,
            }),
            Arc::new(SeededIndex {
                matches: vec![scored("m-0", 0.87, "2.1 Creating a Document")],
            }),
            "main",
        );

        let results = retriever.retrieve("how do I create a document", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.section_title, "2.1 Creating a Document");
        assert_eq!(results[0].chunk.source_document, "manual.pdf");
        assert!((results[0].score - 0.87).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_an_error() {
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
                dimensions: 1536,
            }),
            Arc::new(SeededIndex { matches: Vec::new() }),
            "main",
        );

        let err = retriever.retrieve("q", 5).await.unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[tokio::test]
    async fn index_failure_propagates() {
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
                dimensions: 4,
            }),
            Arc::new(FailingIndex),
            "main",
        );

        let err = retriever.retrieve("q", 5).await.unwrap_err();
        assert!(matches!(err, Error::VectorIndex(_)));
    }
}
