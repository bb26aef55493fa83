//! Page, chunk, and vector record types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw text of one physical page, as produced by PDF extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    /// Source document identifier (typically the filename)
    pub document_id: String,
    /// Page number, 1-indexed
    pub page_number: u32,
    /// Extracted page text
    pub text: String,
}

/// A section-bounded excerpt of a document
///
/// Created by the segmenter, one per contiguous span of non-header lines.
/// `content` is never empty and `ordinal` is unique within a document; the
/// two together give each chunk a deterministic vector id, which makes
/// index builds safely re-runnable (upserts overwrite).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Source document identifier
    pub source_document: String,
    /// Section title (the matched header line, or "Introduction")
    pub section_title: String,
    /// Chunk text, lines joined by newline
    pub content: String,
    /// Page the chunk came from, 1-indexed
    pub page_number: u32,
    /// Position within the document, monotonically increasing
    pub ordinal: u32,
}

impl Chunk {
    /// Deterministic vector id, stable across re-runs
    pub fn vector_id(&self) -> String {
        format!("{}-{}", self.source_document, self.ordinal)
    }

    /// Convert to vector index metadata
    pub fn to_metadata(&self) -> HashMap<String, serde_json::Value> {
        let mut meta = HashMap::new();
        meta.insert("source_document".to_string(), serde_json::json!(self.source_document));
        meta.insert("section_title".to_string(), serde_json::json!(self.section_title));
        meta.insert("content".to_string(), serde_json::json!(self.content));
        meta.insert("page_number".to_string(), serde_json::json!(self.page_number));
        meta.insert("ordinal".to_string(), serde_json::json!(self.ordinal));
        meta
    }

    /// Reconstruct a chunk from vector index metadata
    ///
    /// Lenient on missing fields so that records written by older builds
    /// still retrieve; `content` falls back to empty and is the caller's
    /// signal that the record carried no text.
    pub fn from_metadata(metadata: &HashMap<String, serde_json::Value>) -> Self {
        let get_str = |key: &str| {
            metadata
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        let get_u32 = |key: &str| {
            metadata.get(key).and_then(|v| v.as_u64()).unwrap_or(0) as u32
        };

        Self {
            source_document: get_str("source_document"),
            section_title: get_str("section_title"),
            content: get_str("content"),
            page_number: get_u32("page_number"),
            ordinal: get_u32("ordinal"),
        }
    }
}

/// A vector with id and metadata, as upserted into the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Deterministic record id
    pub id: String,
    /// Embedding vector
    pub values: Vec<f32>,
    /// Chunk-derived metadata
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A scored nearest-neighbor match returned by the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// Record id
    pub id: String,
    /// Relevance score (cosine similarity, higher is better)
    pub score: f32,
    /// Metadata attached at upsert time
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A retrieved chunk with its relevance score, consumed by the prompt assembler
#[derive(Debug, Clone)]
pub struct RetrievedMatch {
    /// The matched chunk, rebuilt from index metadata
    pub chunk: Chunk,
    /// Relevance score as reported by the index service
    pub score: f32,
}
