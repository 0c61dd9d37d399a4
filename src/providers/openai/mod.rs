//! OpenAI (and OpenAI-compatible) provider
//!
//! Uses `/chat/completions` and `/embeddings` with bearer authentication.
//! Point `base_url` at any compatible server (vLLM, LM Studio, OpenRouter,
//! ...). Entries of `options` are merged into the top level of the chat
//! request body (e.g. `temperature`, `max_tokens`); they never replace
//! `model` or `messages`.

mod chat;
mod embeddings;
mod types;

pub use chat::OpenAiChat;
pub use embeddings::OpenAiEmbeddings;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::config::ProviderConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransport, ReqwestTransport};
use crate::traits::{ChatCapability, EmbeddingCapability, ProviderFactory};

pub const PROVIDER_ID: &str = "openai";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// OpenAI provider factory
#[derive(Clone)]
pub struct OpenAiProvider {
    transport: Arc<dyn HttpTransport>,
}

impl OpenAiProvider {
    pub fn new() -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::default()),
        }
    }

    /// Use a custom HTTP transport for every capability this factory builds.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }
}

impl Default for OpenAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider").finish_non_exhaustive()
    }
}

impl ProviderFactory for OpenAiProvider {
    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn requires_credential(&self) -> bool {
        true
    }

    fn create_chat(&self, config: &ProviderConfig) -> Result<Arc<dyn ChatCapability>, LlmError> {
        let headers = build_headers(self.require_credential(config)?)?;
        Ok(Arc::new(OpenAiChat::new(
            config,
            headers,
            self.transport.clone(),
        )))
    }

    fn create_embedder(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn EmbeddingCapability>, LlmError> {
        let headers = build_headers(self.require_credential(config)?)?;
        Ok(Arc::new(OpenAiEmbeddings::new(
            config,
            headers,
            self.transport.clone(),
        )))
    }
}

fn build_headers(api_key: Option<&str>) -> Result<HeaderMap, LlmError> {
    let mut headers = HeaderMap::new();
    if let Some(key) = api_key {
        let mut value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid OpenAI API key: {e}"))
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}
