//! Google Gemini provider
//!
//! Uses the Generative Language REST API (`generateContent` and
//! `embedContent`). The API key is mandatory and sent in the
//! `x-goog-api-key` header.
//!
//! Gemini `contents` have no system role, so system messages are folded into
//! the first user turn (see [`normalize`](crate::normalize)) and the assistant
//! role is sent as `model`. Entries of `options` are forwarded as
//! `generationConfig` (e.g. `temperature`, `maxOutputTokens`).

mod chat;
mod embeddings;
mod types;

pub use chat::GeminiChat;
pub use embeddings::GeminiEmbeddings;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::ProviderConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransport, ReqwestTransport};
use crate::traits::{ChatCapability, EmbeddingCapability, ProviderFactory};

pub const PROVIDER_ID: &str = "gemini";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Gemini provider factory
#[derive(Clone)]
pub struct GeminiProvider {
    transport: Arc<dyn HttpTransport>,
}

impl GeminiProvider {
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

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider").finish_non_exhaustive()
    }
}

impl ProviderFactory for GeminiProvider {
    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn requires_credential(&self) -> bool {
        true
    }

    fn create_chat(&self, config: &ProviderConfig) -> Result<Arc<dyn ChatCapability>, LlmError> {
        let headers = build_headers(self.require_credential(config)?)?;
        Ok(Arc::new(GeminiChat::new(
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
        Ok(Arc::new(GeminiEmbeddings::new(
            config,
            headers,
            self.transport.clone(),
        )))
    }
}

fn build_headers(api_key: Option<&str>) -> Result<HeaderMap, LlmError> {
    let mut headers = HeaderMap::new();
    if let Some(key) = api_key {
        let mut value = HeaderValue::from_str(key).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid Gemini API key: {e}"))
        })?;
        value.set_sensitive(true);
        headers.insert("x-goog-api-key", value);
    }
    Ok(headers)
}

/// Strip the optional `models/` prefix so URLs are built consistently.
fn model_path(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}
