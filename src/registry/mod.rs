//! Provider registry
//!
//! Maps a provider selector (e.g. `"ollama"`) to its factory. Names are stored
//! lowercase and matched case-insensitively. The registry is filled during
//! startup through `&mut self` and then shared immutably (typically behind an
//! `Arc`), so lookups need no synchronization.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::LlmError;
use crate::traits::ProviderFactory;

/// Registry of provider factories keyed by lowercase name
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    by_id: BTreeMap<String, Arc<dyn ProviderFactory>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` under `name`. Registering a name twice is an error.
    pub fn register(
        &mut self,
        name: impl AsRef<str>,
        handle: Arc<dyn ProviderFactory>,
    ) -> Result<(), LlmError> {
        let key = name.as_ref().trim().to_lowercase();
        if key.is_empty() {
            return Err(LlmError::ConfigurationError(
                "provider name must not be empty".to_string(),
            ));
        }
        if self.by_id.contains_key(&key) {
            return Err(LlmError::ConfigurationError(format!(
                "provider '{key}' is already registered"
            )));
        }
        self.by_id.insert(key, handle);
        Ok(())
    }

    /// Register a factory under its own `provider_id`.
    pub fn register_factory(&mut self, handle: Arc<dyn ProviderFactory>) -> Result<(), LlmError> {
        let name = handle.provider_id();
        self.register(name, handle)
    }

    /// Look up a provider by name, ignoring case.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ProviderFactory>, LlmError> {
        self.by_id
            .get(&name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| LlmError::UnknownProvider {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.by_id.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_id.contains_key(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Convenience helpers to bootstrap registries with the bundled providers
pub mod helpers;

pub use helpers::ProviderClients;
