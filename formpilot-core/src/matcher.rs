use crate::profile::Profile;
use formpilot_common::Result;
use formpilot_embed::{cosine_similarity, Embedder, Embedding};
use std::sync::Arc;
use tracing::debug;

/// Outcome of matching one question against the profile. Derived per call,
/// never stored.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub question: String,
    pub field: String,
    pub score: f32,
}

struct FieldEntry {
    name: String,
    value: String,
    embedding: Embedding,
}

/// Matches question texts to profile fields by embedding similarity.
///
/// One embedding per field name is computed at construction and reused for
/// every comparison in the run; the profile is static for the process
/// lifetime, so nothing ever invalidates the cache.
pub struct FieldMatcher {
    embedder: Arc<dyn Embedder>,
    fields: Vec<FieldEntry>,
}

impl FieldMatcher {
    /// Build the matcher, embedding every field name exactly once.
    pub async fn new(profile: &Profile, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let mut fields = Vec::with_capacity(profile.len());
        for (name, value) in profile.iter() {
            let embedding = embedder.embed(name).await?;
            fields.push(FieldEntry {
                name: name.to_string(),
                value: value.to_string(),
                embedding,
            });
        }

        debug!(
            target: "matcher",
            fields = fields.len(),
            model = embedder.model_name(),
            "profile embeddings cached"
        );

        Ok(Self { embedder, fields })
    }

    /// Return the best-matching profile field for `question`, or `None` when
    /// the maximum similarity falls below `threshold`.
    ///
    /// The question is re-embedded on every call; questions are not repeated
    /// within a fill pass. Ties keep the first-encountered maximum.
    pub async fn best_field(&self, question: &str, threshold: f32) -> Result<Option<MatchResult>> {
        let question_embedding = self.embedder.embed(question).await?;

        let mut best: Option<(&FieldEntry, f32)> = None;
        for entry in &self.fields {
            let score = cosine_similarity(&question_embedding, &entry.embedding);
            // strict > keeps the first-encountered maximum on ties
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((entry, score));
            }
        }

        match best {
            Some((entry, score)) if score >= threshold => {
                debug!(
                    target: "matcher",
                    %question,
                    field = %entry.name,
                    score,
                    "matched question to field"
                );
                Ok(Some(MatchResult {
                    question: question.to_string(),
                    field: entry.name.clone(),
                    score,
                }))
            }
            Some((entry, score)) => {
                debug!(
                    target: "matcher",
                    %question,
                    nearest = %entry.name,
                    score,
                    threshold,
                    "best candidate below threshold"
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// The answer value for a matched field name.
    pub fn value_of(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|entry| entry.name == field)
            .map(|entry| entry.value.as_str())
    }

    /// Shared handle to the embedding backend, for the choice strategy.
    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }
}
