//! Pinecone vector index client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::types::{ScoredMatch, VectorRecord};

use super::vector_index::VectorIndexProvider;

/// Client for one Pinecone index, addressed by its host URL
pub struct PineconeIndex {
    client: Client,
    host: String,
    api_key: String,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
    namespace: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    namespace: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<ScoredMatch>,
}

impl PineconeIndex {
    /// Create a client for the configured index host
    pub fn new(config: &IndexConfig, api_key: String) -> Result<Self> {
        if config.host.is_empty() {
            return Err(Error::config("vector index host is not configured"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl VectorIndexProvider for PineconeIndex {
    async fn upsert(&self, namespace: &str, records: &[VectorRecord]) -> Result<()> {
        let url = format!("{}/vectors/upsert", self.host);
        let request = UpsertRequest {
            vectors: records,
            namespace,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_index(format!("upsert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_index(format!(
                "upsert failed: HTTP {} - {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredMatch>> {
        let url = format!("{}/query", self.host);
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            namespace,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_index(format!("query request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_index(format!(
                "query failed: HTTP {} - {}",
                status, body
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::vector_index(format!("malformed query response: {}", e)))?;

        Ok(parsed.matches)
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}
