//! Answer generation via the external chat model

pub mod prompt;

pub use prompt::{PromptBuilder, FALLBACK_PHRASE};

use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;

/// Fixed system instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant answering based on technical user documentation.";

/// Sends assembled prompts to the chat model
///
/// Returns the model's raw textual answer unmodified. Service errors
/// propagate; retry policy, if any, belongs to the caller.
pub struct ResponseGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl ResponseGenerator {
    /// Create a generator over the given chat model provider
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Generate an answer for an assembled prompt
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            provider = self.llm.name(),
            model = self.llm.model(),
            prompt_len = prompt.len(),
            "generating answer"
        );
        self.llm.complete(SYSTEM_INSTRUCTION, prompt).await
    }
}
