//! Chat model provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for chat-model answer generation
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a system instruction plus a user prompt, return the raw answer
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Model identifier in use
    fn model(&self) -> &str;

    /// Provider name for logging
    fn name(&self) -> &str;
}
