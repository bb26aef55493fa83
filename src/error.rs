//! Error types for the RAG system

use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG system errors
///
/// Indexing-time failures (a chunk that will not embed, a batch that will
/// not upsert) are handled inside the builder and never reach callers as
/// errors. Query-time failures always do: a retrieval or generation error
/// must surface as an error, never as a content-looking fallback answer.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Embedding service error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector index service error
    #[error("Vector index error: {0}")]
    VectorIndex(String),

    /// Chat model error
    #[error("Answer generation failed: {0}")]
    Generation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector index error
    pub fn vector_index(message: impl Into<String>) -> Self {
        Self::VectorIndex(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }
}
