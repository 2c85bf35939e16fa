use async_trait::async_trait;
use formpilot_common::Result;

/// A fixed-length vector produced by an embedding model.
pub type Embedding = Vec<f32>;

/// Provider-agnostic embedding backend.
///
/// Implementations are process-scoped: constructed once at startup and
/// shared by reference for the lifetime of the run.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single piece of text.
    async fn embed(&self, text: &str) -> Result<Embedding>;

    /// Check if the backing service is reachable.
    async fn health_check(&self) -> Result<bool>;

    /// The model identifier in use.
    fn model_name(&self) -> &str;
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched dimensions or zero-norm inputs, which reads as
/// "no similarity" to every caller and keeps threshold comparisons total.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();

    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)) as f32
}
