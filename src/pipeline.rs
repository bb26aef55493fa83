//! Top-level orchestration of one question/answer request

use crate::error::Result;
use crate::generation::{PromptBuilder, ResponseGenerator};
use crate::memory::{ConversationMemory, ConversationTurn};
use crate::retrieval::Retriever;

/// The externally callable core: retrieve, assemble, generate, remember
///
/// Each request runs sequentially and synchronously end to end. The
/// conversation memory is an explicit per-session handle owned by the
/// caller; the pipeline holds no session state of its own.
pub struct RagPipeline {
    retriever: Retriever,
    generator: ResponseGenerator,
    top_k: usize,
    history_turns: usize,
}

impl RagPipeline {
    /// Assemble a pipeline from its stages
    pub fn new(
        retriever: Retriever,
        generator: ResponseGenerator,
        top_k: usize,
        history_turns: usize,
    ) -> Self {
        Self {
            retriever,
            generator,
            top_k,
            history_turns,
        }
    }

    /// Answer one query against the indexed corpus
    ///
    /// Retrieval or generation failures propagate as errors; they are never
    /// converted into a content-looking "couldn't find" answer. On success
    /// the completed turn is appended to `memory`.
    pub async fn answer(&self, memory: &mut ConversationMemory, query: &str) -> Result<String> {
        let matches = self.retriever.retrieve(query, self.top_k).await?;
        tracing::info!(matches = matches.len(), "retrieved context for query");

        let prompt = PromptBuilder::build_prompt(query, &matches, memory.recent(self.history_turns));
        let answer = self.generator.generate(&prompt).await?;

        memory.append(ConversationTurn {
            user_query: query.to_string(),
            assistant_answer: answer.clone(),
        });

        Ok(answer)
    }
}
