//! Ollama provider
//!
//! Talks to a local (or remote) Ollama server through `/api/chat` and
//! `/api/embed`. No credential is needed.
//!
//! Recognized `options` keys: `keep_alive` is sent at the top level of each
//! request; every other key is forwarded inside Ollama's `options` object
//! (e.g. `temperature`, `num_ctx`).

mod chat;
mod embeddings;
mod types;

pub use chat::OllamaChat;
pub use embeddings::OllamaEmbeddings;

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransport, ReqwestTransport};
use crate::traits::{ChatCapability, EmbeddingCapability, ProviderFactory};

pub const PROVIDER_ID: &str = "ollama";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_CHAT_MODEL: &str = "llama3.2";
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Ollama provider factory
#[derive(Clone)]
pub struct OllamaProvider {
    transport: Arc<dyn HttpTransport>,
}

impl OllamaProvider {
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

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OllamaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaProvider").finish_non_exhaustive()
    }
}

impl ProviderFactory for OllamaProvider {
    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn requires_credential(&self) -> bool {
        false
    }

    fn create_chat(&self, config: &ProviderConfig) -> Result<Arc<dyn ChatCapability>, LlmError> {
        Ok(Arc::new(OllamaChat::new(config, self.transport.clone())))
    }

    fn create_embedder(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn EmbeddingCapability>, LlmError> {
        Ok(Arc::new(OllamaEmbeddings::new(config, self.transport.clone())))
    }
}

/// Split `options` into the top-level `keep_alive` and the model `options` object.
fn split_options(
    config: &ProviderConfig,
) -> (Option<serde_json::Value>, Option<serde_json::Map<String, serde_json::Value>>) {
    let mut options = config.options.clone();
    let keep_alive = options.remove("keep_alive");
    let options = (!options.is_empty()).then_some(options);
    (keep_alive, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn does_not_require_credential() {
        let provider = OllamaProvider::new();
        assert!(!provider.requires_credential());
        assert!(provider.create_chat(&ProviderConfig::new()).is_ok());
        assert!(provider.create_embedder(&ProviderConfig::new()).is_ok());
    }

    #[test]
    fn keep_alive_is_split_from_model_options() {
        let config = ProviderConfig::new()
            .with_option("keep_alive", json!("5m"))
            .with_option("temperature", json!(0.2));
        let (keep_alive, options) = split_options(&config);
        assert_eq!(keep_alive, Some(json!("5m")));
        let options = options.unwrap();
        assert_eq!(options.get("temperature"), Some(&json!(0.2)));
        assert!(!options.contains_key("keep_alive"));
    }
}
