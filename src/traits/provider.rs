//! Provider factory trait

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::LlmError;

use super::{ChatCapability, EmbeddingCapability};

/// One backend variant, registered in the
/// [`ProviderRegistry`](crate::registry::ProviderRegistry) under its id.
///
/// Factories are created once at startup and hold no per-request state, so a
/// single `Arc<dyn ProviderFactory>` can serve any number of concurrent tasks.
pub trait ProviderFactory: Send + Sync {
    /// Lowercase registry key, e.g. `"ollama"`.
    fn provider_id(&self) -> &'static str;

    /// Whether `create_chat` / `create_embedder` need `api_key`.
    fn requires_credential(&self) -> bool;

    /// Build a chat capability. Fails with `ConfigurationError` when a
    /// required credential is missing, before any network call.
    fn create_chat(&self, config: &ProviderConfig) -> Result<Arc<dyn ChatCapability>, LlmError>;

    /// Build an embedding capability. Same credential rules as `create_chat`.
    fn create_embedder(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn EmbeddingCapability>, LlmError>;

    /// The credential from `config`, or a `ConfigurationError` when this
    /// provider needs one and it is absent.
    fn require_credential<'a>(
        &self,
        config: &'a ProviderConfig,
    ) -> Result<Option<&'a str>, LlmError> {
        match config.api_key() {
            Some(key) => Ok(Some(key)),
            None if self.requires_credential() => Err(LlmError::ConfigurationError(format!(
                "{} requires an API key",
                self.provider_id()
            ))),
            None => Ok(None),
        }
    }
}
