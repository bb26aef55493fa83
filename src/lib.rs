//! manual-rag: retrieval-augmented Q&A over technical PDF manuals
//!
//! This crate covers the two halves of a manual Q&A system: an offline
//! ingestion path that turns raw extracted page text into section-aware
//! chunks and upserts their embeddings into a vector index, and an online
//! pipeline that retrieves the top-matching chunks for a question and asks
//! a chat model to answer from them, carrying recent conversation history.
//!
//! PDF text extraction, the embedding/chat models, and the vector index are
//! external collaborators behind the traits in [`providers`].

pub mod config;
pub mod error;
pub mod generation;
pub mod indexing;
pub mod ingestion;
pub mod memory;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use memory::{ConversationMemory, ConversationTurn};
pub use pipeline::RagPipeline;
pub use types::{Chunk, RawPage, RetrievedMatch};
