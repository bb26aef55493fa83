//! Configuration for the RAG system
//!
//! Service credentials (API keys) are environment-supplied and never part of
//! the config file. The embedding model and dimensionality live in a single
//! section consumed by both the index builder and the retriever, so the two
//! cannot drift apart.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main RAG system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Embedding service configuration
    pub embedding: EmbeddingConfig,
    /// Vector index configuration
    pub index: IndexConfig,
    /// Chat model configuration
    pub llm: LlmConfig,
    /// Noise filtering and section segmentation
    pub chunking: ChunkingConfig,
    /// Offline index build configuration
    pub indexing: IndexingConfig,
    /// Query-time retrieval configuration
    pub retrieval: RetrievalConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&contents).map_err(|e| Error::config(e.to_string()))
    }

    /// Load from a TOML file if it exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Embedding service configuration
///
/// The same model and dimensionality are used at index-build time and at
/// query time. A mismatch is a silent-correctness hazard, so the retriever
/// checks returned vectors against `dimensions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding API base URL
    pub api_base: String,
    /// Embedding model identifier
    pub model: String,
    /// Embedding dimensionality (1536 for text-embedding-3-small)
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            timeout_secs: 30,
        }
    }
}

/// Vector index configuration
///
/// The index must be created ahead of time with cosine similarity and the
/// same dimensionality as [`EmbeddingConfig::dimensions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Index host URL (e.g. "https://my-index-abc123.svc.pinecone.io")
    pub host: String,
    /// Namespace isolating this corpus within the index
    pub namespace: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            namespace: "main".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Chat model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat API base URL
    pub api_base: String,
    /// Generation model identifier
    pub model: String,
    /// Sampling temperature (low favors faithfulness over creativity)
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.2,
            timeout_secs: 120,
        }
    }
}

/// Noise filtering and section segmentation configuration
///
/// One canonical, named configuration for the segmenter: the header pattern
/// that opens a new section, the footer pattern for page furniture, and the
/// legal-boilerplate phrase list matched case-insensitively as substrings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Regex for section header lines (numeric outline prefix + text)
    pub header_pattern: String,
    /// Regex for footer/boilerplate lines dropped outright
    pub footer_pattern: String,
    /// Boilerplate phrases dropped on case-insensitive substring match
    pub noise_phrases: Vec<String>,
    /// Section title assigned before the first header is seen
    pub default_section_title: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            header_pattern: r"^\d+(\.\d+)*\s+.+".to_string(),
            footer_pattern: r"(?i)(Page\s+\d+|Confidential|Company Name)".to_string(),
            noise_phrases: vec![
                "use and copying of any intelinotion software described in this publication requires an applicable software license".to_string(),
                "intelinotion believes the information in this publication is accurate as of its publication date".to_string(),
                "the information is subject to change".to_string(),
                "without notice".to_string(),
                "shared without prior written consent of intelinotion llc".to_string(),
                "422 executive drive, building 4, princeton, nj, 08540 info@intelinotion.com page".to_string(),
            ],
            default_section_title: "Introduction".to_string(),
        }
    }
}

/// Offline index build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    /// Vectors per upsert batch
    pub batch_size: usize,
    /// Directory where failed upsert batches are persisted for retry
    pub failed_batch_dir: PathBuf,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        let failed_batch_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("manual-rag")
            .join("failed_batches");

        Self {
            batch_size: 100,
            failed_batch_dir,
        }
    }
}

/// Query-time retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of nearest chunks to retrieve
    pub top_k: usize,
    /// Number of recent conversation turns included in the prompt
    pub history_turns: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            history_turns: 5,
        }
    }
}

/// Read an API key from the environment
pub fn api_key_from_env(var: &str) -> Result<String> {
    std::env::var(var)
        .map_err(|_| Error::config(format!("environment variable {} is not set", var)))
}
