//! Embedding capability set for the formpilot workspace.
//!
//! The matcher and the choice-fill strategy treat the embedding model as a
//! black box: text in, vector out, plus a similarity function over vector
//! pairs. This crate provides that seam:
//!
//! - [`traits::Embedder`]: provider-agnostic embedding trait
//! - [`traits::cosine_similarity`]: similarity over two vectors
//! - [`ollama::OllamaEmbedder`]: local inference via an Ollama server
//! - [`openai::OpenAiEmbedder`]: hosted inference via the OpenAI API

pub mod ollama;
pub mod openai;
pub mod traits;

pub use traits::{cosine_similarity, Embedder, Embedding};
