//! Provider abstractions for the external embedding, vector index, and chat
//! model services
//!
//! The segmenter, builder, retriever, and assembler never talk to a service
//! directly; they go through these narrow traits so each stage is testable
//! with fakes.

pub mod embedding;
pub mod llm;
pub mod openai;
pub mod pinecone;
pub mod vector_index;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use openai::OpenAiClient;
pub use pinecone::PineconeIndex;
pub use vector_index::VectorIndexProvider;
