use crate::traits::{Embedder, Embedding};
use async_trait::async_trait;
use formpilot_common::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI embedding client (`/v1/embeddings`).
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

/// One element in the `data` array
#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    /// Create a new client for the given endpoint, API key, and model.
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FormError::Embedder(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let url = format!("{}/embeddings", self.base_url);
        let payload = EmbeddingsRequest {
            model: &self.model,
            input: text,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| FormError::Embedder(format!("Embedding request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(FormError::Embedder(format!(
                "Embedding failed: HTTP {}",
                resp.status()
            )));
        }

        let body: EmbeddingsResponse = resp
            .json()
            .await
            .map_err(|e| FormError::Embedder(format!("Failed to parse response: {}", e)))?;

        body.data
            .into_iter()
            .next()
            .map(|row| row.embedding)
            .ok_or_else(|| FormError::Embedder("Embedding response contained no data".to_string()))
    }

    async fn health_check(&self) -> Result<bool> {
        // The embeddings endpoint has no cheap probe; a HEAD against the base
        // URL answers "is the host reachable" which is all callers need.
        Ok(self.client.head(&self.base_url).send().await.is_ok())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
