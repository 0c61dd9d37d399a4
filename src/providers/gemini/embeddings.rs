//! Gemini embeddings capability (`models/{model}:embedContent`).

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

use super::types::{Content, EmbedContentRequest, EmbedContentResponse, Part};
use super::{DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL, PROVIDER_ID, model_path};

#[derive(Clone)]
pub struct GeminiEmbeddings {
    base_url: String,
    model: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
    headers: HeaderMap,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for GeminiEmbeddings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiEmbeddings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_attempts", &self.retry_policy.max_attempts)
            .finish()
    }
}

impl GeminiEmbeddings {
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

    fn build_request_body(&self, text: &str) -> Result<serde_json::Value, LlmError> {
        let body = EmbedContentRequest {
            model: format!("models/{}", model_path(&self.model)),
            content: Content {
                role: None,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        };
        Ok(serde_json::to_value(body)?)
    }

    async fn embed_once(&self, text: &str) -> Result<EmbeddingResponse, LlmError> {
        let body = self.build_request_body(text)?;
        let url = format!(
            "{}/models/{}:embedContent",
            self.base_url,
            model_path(&self.model)
        );
        let response: EmbedContentResponse = post_json(
            self.transport.as_ref(),
            PROVIDER_ID,
            url,
            self.headers.clone(),
            body,
        )
        .await?;

        EmbeddingResponse::try_new(response.embedding.values, self.model.clone())
    }
}

#[async_trait]
impl EmbeddingCapability for GeminiEmbeddings {
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
