//! Registry convenience helpers

use std::sync::Arc;

use super::ProviderRegistry;
use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::traits::{ChatCapability, EmbeddingCapability, ProviderFactory};

impl ProviderRegistry {
    /// Registry holding every provider compiled into this crate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for factory in builtin_factories() {
            let name = factory.provider_id();
            // Built-in ids are distinct constants.
            if let Err(error) = registry.register(name, factory) {
                tracing::warn!(provider = name, error = %error, "skipping built-in provider");
            }
        }
        registry
    }

    /// Resolve the provider selected by `config` and build both capabilities.
    ///
    /// Settings come from the section named like the selector (so a factory
    /// registered as `"local"` reads `providers.local`); when that section is
    /// absent, the section named after the factory's `provider_id` is used.
    /// Construction errors (unknown selector, missing credential) surface here
    /// at startup rather than on the first request.
    pub fn from_config(&self, config: &LlmConfig) -> Result<ProviderClients, LlmError> {
        let provider = self.resolve(&config.provider)?;
        let section = if config.has_provider_config(&config.provider) {
            config.provider.trim()
        } else {
            provider.provider_id()
        };
        let provider_config = config.provider_config(section);
        let chat = provider.create_chat(&provider_config)?;
        let embedder = provider.create_embedder(&provider_config)?;
        tracing::info!(
            provider = provider.provider_id(),
            section,
            "provider initialized"
        );
        Ok(ProviderClients {
            provider,
            chat,
            embedder,
        })
    }
}

/// The capabilities built for the configured provider.
#[derive(Clone)]
pub struct ProviderClients {
    pub provider: Arc<dyn ProviderFactory>,
    pub chat: Arc<dyn ChatCapability>,
    pub embedder: Arc<dyn EmbeddingCapability>,
}

impl std::fmt::Debug for ProviderClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClients")
            .field("provider", &self.provider.provider_id())
            .field("embedding_model", &self.embedder.embedding_model())
            .finish()
    }
}

fn builtin_factories() -> Vec<Arc<dyn ProviderFactory>> {
    #[allow(unused_mut)]
    let mut factories: Vec<Arc<dyn ProviderFactory>> = Vec::new();
    #[cfg(feature = "ollama")]
    factories.push(Arc::new(crate::providers::ollama::OllamaProvider::new()));
    #[cfg(feature = "gemini")]
    factories.push(Arc::new(crate::providers::gemini::GeminiProvider::new()));
    #[cfg(feature = "openai")]
    factories.push(Arc::new(crate::providers::openai::OpenAiProvider::new()));
    factories
}
