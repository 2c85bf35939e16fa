use async_trait::async_trait;
use formpilot_common::{FormError, Result};
use formpilot_embed::{Embedder, Embedding};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic embedder for tests: every known text maps to a fixed
/// vector, so similarity scores are chosen by construction (for 2-d unit
/// directions the cosine against `[1, 0]` is just the first component).
pub struct StubEmbedder {
    vectors: HashMap<String, Embedding>,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new<const N: usize>(entries: [(&str, &[f32]); N]) -> Self {
        Self {
            vectors: entries
                .into_iter()
                .map(|(text, v)| (text.to_string(), v.to_vec()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many embed requests the stub has served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| FormError::Embedder(format!("no stub vector for {text:?}")))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn model_name(&self) -> &str {
        "stub-embedder"
    }
}
