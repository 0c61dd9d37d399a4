//! Embedding capability trait

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::EmbeddingResponse;

#[async_trait]
pub trait EmbeddingCapability: Send + Sync {
    /// Embed one text.
    ///
    /// Retried with backoff; after the last attempt the error is returned.
    /// A successful result always holds a non-empty vector.
    async fn embed(&self, text: &str) -> Result<EmbeddingResponse, LlmError>;

    /// Embed several texts in order, stopping at the first failure.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingResponse>, LlmError> {
        let mut responses = Vec::with_capacity(texts.len());
        for text in texts {
            responses.push(self.embed(text).await?);
        }
        Ok(responses)
    }

    /// Model used for embeddings.
    fn embedding_model(&self) -> &str;
}
