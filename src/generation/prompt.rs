//! Prompt assembly from retrieved context and conversation history

use crate::memory::ConversationTurn;
use crate::types::RetrievedMatch;

/// The exact phrase the model is told to use when nothing relevant exists
/// in the retrieved context. A content outcome, never an error signal.
pub const FALLBACK_PHRASE: &str = "I couldn't find the relevant information.";

/// Assembles the single structured prompt sent to the chat model
///
/// Pure string assembly: no side effects, no I/O.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render retrieved matches as labeled context blocks, retrieval order
    /// preserved
    pub fn build_context(matches: &[RetrievedMatch]) -> String {
        let blocks: Vec<String> = matches
            .iter()
            .map(|m| {
                format!(
                    "From '{}', page {}:\nSection: {}\n\n{}",
                    m.chunk.source_document,
                    m.chunk.page_number,
                    m.chunk.section_title,
                    m.chunk.content
                )
            })
            .collect();

        blocks.join("\n\n---\n\n")
    }

    /// Render history turns as chronological user/assistant lines
    pub fn build_history(history: &[ConversationTurn]) -> String {
        let mut text = String::new();
        for turn in history {
            text.push_str(&format!(
                "User: {}\nAssistant: {}\n\n",
                turn.user_query, turn.assistant_answer
            ));
        }
        text
    }

    /// Build the full prompt for one query
    ///
    /// The instruction restricts the assistant to the supplied context,
    /// asks it to surface the closest available information rather than
    /// refuse outright, and names [`FALLBACK_PHRASE`] as the only
    /// acceptable no-information response. Empty matches produce an empty
    /// context block, not an error.
    pub fn build_prompt(
        query: &str,
        matches: &[RetrievedMatch],
        history: &[ConversationTurn],
    ) -> String {
        format!(
            "You are a helpful assistant that answers based only on the user manual \
             content provided below.\n\
             \n\
             Chat History:\n\
             {history}\n\
             Relevant Context:\n\
             {context}\n\
             \n\
             User Question: {query}\n\
             \n\
             Answer the question mostly based on the context above. Even if the \
             documentation does not provide a specific definition or explanation, \
             still provide the closest available information. Only if nothing \
             relevant is found, respond with '{fallback}'.\n",
            history = Self::build_history(history),
            context = Self::build_context(matches),
            query = query,
            fallback = FALLBACK_PHRASE,
        )
    }
}
