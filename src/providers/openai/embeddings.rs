//! OpenAI embeddings capability (`/embeddings`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::json;

use crate::config::ProviderConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransport, post_json};
use crate::execution::policy::embed_with_retry;
use crate::retry::RetryPolicy;
use crate::traits::EmbeddingCapability;
use crate::types::EmbeddingResponse;

use super::types::EmbeddingsResponse;
use super::{DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL, PROVIDER_ID};

#[derive(Clone)]
pub struct OpenAiEmbeddings {
    base_url: String,
    model: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
    headers: HeaderMap,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for OpenAiEmbeddings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbeddings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_attempts", &self.retry_policy.max_attempts)
            .finish()
    }
}

impl OpenAiEmbeddings {
    pub(super) fn new(
        config: &ProviderConfig,
        headers: HeaderMap,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            model: config
                .embedding_model
                .clone()
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            timeout: config.timeout(),
            retry_policy: RetryPolicy::from_config(config),
            headers,
            transport,
        }
    }

    async fn embed_once(&self, text: &str) -> Result<EmbeddingResponse, LlmError> {
        let url = format!("{}/embeddings", self.base_url);
        let response: EmbeddingsResponse = post_json(
            self.transport.as_ref(),
            PROVIDER_ID,
            url,
            self.headers.clone(),
            json!({ "model": self.model, "input": text }),
        )
        .await?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .unwrap_or_default();
        EmbeddingResponse::try_new(embedding, self.model.clone())
    }
}

#[async_trait]
impl EmbeddingCapability for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<EmbeddingResponse, LlmError> {
        embed_with_retry(PROVIDER_ID, &self.model, &self.retry_policy, self.timeout, || {
            self.embed_once(text)
        })
        .await
    }

    fn embedding_model(&self) -> &str {
        &self.model
    }
}
