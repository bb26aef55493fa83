//! OpenAI client for embeddings and chat completions

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{EmbeddingConfig, LlmConfig};
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

/// OpenAI API client implementing both provider traits
///
/// One instance carries both the embedding and the chat configuration so a
/// single client can back the builder, the retriever, and the generator.
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: String,
    embed_model: String,
    dimensions: usize,
    embed_timeout: Duration,
    chat_model: String,
    temperature: f32,
    chat_timeout: Duration,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: [&'a str; 1],
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiClient {
    /// Create a client from embedding and chat configuration
    ///
    /// Each config section's timeout is applied per request, so embedding
    /// calls and chat calls keep their own bounds; expiry surfaces as the
    /// corresponding embedding/generation error.
    pub fn new(embedding: &EmbeddingConfig, llm: &LlmConfig, api_key: String) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_base: embedding.api_base.clone(),
            api_key,
            embed_model: embedding.model.clone(),
            dimensions: embedding.dimensions,
            embed_timeout: Duration::from_secs(embedding.timeout_secs),
            chat_model: llm.model.clone(),
            temperature: llm.temperature,
            chat_timeout: Duration::from_secs(llm.timeout_secs),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/embeddings", self.api_base);
        let request = EmbeddingRequest {
            input: [text],
            model: &self.embed_model,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.embed_timeout)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!("HTTP {} - {}", status, body)));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("malformed response: {}", e)))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::embedding("response contained no embedding"))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);
        let request = ChatRequest {
            model: &self.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.chat_model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .timeout(self.chat_timeout)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::generation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!("HTTP {} - {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::generation("response contained no choices"))
    }

    fn model(&self) -> &str {
        &self.chat_model
    }

    fn name(&self) -> &str {
        "openai"
    }
}
