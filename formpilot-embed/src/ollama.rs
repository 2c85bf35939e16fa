use crate::traits::{Embedder, Embedding};
use async_trait::async_trait;
use formpilot_common::{FormError, Result};
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

const OLLAMA_CONNECTION_ERROR: &str = "No running Ollama server detected. Start it with: `ollama serve` (after installing). Install instructions: https://github.com/ollama/ollama";

/// Ollama embedding client for local model inference.
///
/// Expects a running Ollama server (see https://github.com/ollama/ollama).
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    /// Create a new client and verify server/model availability.
    pub async fn new(base_url: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FormError::Embedder(format!("Failed to create HTTP client: {}", e)))?;

        let embedder = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        };

        // Verify server is reachable
        embedder.probe_server().await?;

        // Ensure model is available
        embedder.ensure_model_available().await?;

        Ok(embedder)
    }

    async fn probe_server(&self) -> Result<()> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| FormError::Embedder(OLLAMA_CONNECTION_ERROR.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(FormError::Embedder(OLLAMA_CONNECTION_ERROR.to_string()))
        }
    }

    async fn ensure_model_available(&self) -> Result<()> {
        let models = self.fetch_available_models().await?;

        // `ollama list` reports tagged names like "nomic-embed-text:latest".
        let known = models
            .iter()
            .any(|m| m == &self.model || m.strip_suffix(":latest") == Some(self.model.as_str()));

        if !known {
            tracing::info!("Model {} not found locally, pulling...", self.model);
            self.pull_model(&self.model).await?;
        }

        Ok(())
    }

    async fn fetch_available_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FormError::Embedder(format!("Failed to fetch models: {}", e)))?;

        if !resp.status().is_success() {
            return Ok(Vec::new());
        }

        let val: JsonValue = resp
            .json()
            .await
            .map_err(|e| FormError::Embedder(format!("Failed to parse models response: {}", e)))?;

        let models = val
            .get("models")
            .and_then(|m| m.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.get("name").and_then(|n| n.as_str()))
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }

    async fn pull_model(&self, model: &str) -> Result<()> {
        let url = format!("{}/api/pull", self.base_url);
        let payload = json!({
            "model": model,
            "stream": false
        });

        let resp = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| FormError::Embedder(format!("Failed to pull model: {}", e)))?;

        if resp.status().is_success() {
            tracing::info!("Successfully pulled model: {}", model);
            Ok(())
        } else {
            Err(FormError::Embedder(format!(
                "Failed to pull model: HTTP {}",
                resp.status()
            )))
        }
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let url = format!("{}/api/embeddings", self.base_url);

        let payload = json!({
            "model": self.model,
            "prompt": text,
        });

        let resp = self
            .client
            .post(&url)
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

        let val: JsonValue = resp
            .json()
            .await
            .map_err(|e| FormError::Embedder(format!("Failed to parse response: {}", e)))?;

        let vector: Embedding = val
            .get("embedding")
            .and_then(|e| e.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_f64())
                    .map(|f| f as f32)
                    .collect()
            })
            .unwrap_or_default();

        if vector.is_empty() {
            return Err(FormError::Embedder(
                "Embedding response contained no vector".to_string(),
            ));
        }

        Ok(vector)
    }

    async fn health_check(&self) -> Result<bool> {
        self.probe_server().await.map(|_| true).or(Ok(false))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
