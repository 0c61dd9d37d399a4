//! Ollama Embeddings Implementation
//!
//! Uses the `/api/embed` endpoint, one input per call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::config::ProviderConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransport, post_json};
use crate::execution::policy::embed_with_retry;
use crate::retry::RetryPolicy;
use crate::traits::EmbeddingCapability;
use crate::types::EmbeddingResponse;

use super::types::{OllamaEmbedRequest, OllamaEmbedResponse};
use super::{DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL, PROVIDER_ID, split_options};

/// Ollama embeddings capability
#[derive(Clone)]
pub struct OllamaEmbeddings {
    base_url: String,
    model: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
    keep_alive: Option<serde_json::Value>,
    options: Option<serde_json::Map<String, serde_json::Value>>,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for OllamaEmbeddings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaEmbeddings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_attempts", &self.retry_policy.max_attempts)
            .finish()
    }
}

impl OllamaEmbeddings {
    pub fn new(config: &ProviderConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let (keep_alive, options) = split_options(config);
        Self {
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            model: config
                .embedding_model
                .clone()
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            timeout: config.timeout(),
            retry_policy: RetryPolicy::from_config(config),
            keep_alive,
            options,
            transport,
        }
    }

    async fn embed_once(&self, text: &str) -> Result<EmbeddingResponse, LlmError> {
        let body = serde_json::to_value(OllamaEmbedRequest {
            model: &self.model,
            input: text,
            options: self.options.as_ref(),
            keep_alive: self.keep_alive.as_ref(),
        })?;
        let url = format!("{}/api/embed", self.base_url);
        let response: OllamaEmbedResponse = post_json(
            self.transport.as_ref(),
            PROVIDER_ID,
            url,
            HeaderMap::new(),
            body,
        )
        .await?;

        let embedding = response.embeddings.into_iter().next().unwrap_or_default();
        EmbeddingResponse::try_new(embedding, self.model.clone())
    }
}

#[async_trait]
impl EmbeddingCapability for OllamaEmbeddings {
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
