//! Core types for the RAG system

pub mod document;

pub use document::{Chunk, RawPage, RetrievedMatch, ScoredMatch, VectorRecord};
