//! Embedding result type.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Embedding vector for one input text.
///
/// The dimensionality is fixed by the embedding model; it is the vector
/// store's job to check it against its index, not this crate's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl EmbeddingResponse {
    /// Build a response, rejecting empty vectors so they never reach an index.
    pub fn try_new(embedding: Vec<f32>, model: impl Into<String>) -> Result<Self, LlmError> {
        if embedding.is_empty() {
            return Err(LlmError::ParseError(
                "backend returned an empty embedding".to_string(),
            ));
        }
        Ok(Self {
            embedding,
            model: Some(model.into()),
        })
    }

    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}
