//! Provider configuration.
//!
//! Configuration is an explicit value handed to provider factories; nothing in
//! this crate reads the environment or keeps process-wide settings. The
//! surrounding application loads and validates these structs (they derive
//! `Deserialize` and `Validate`) before asking the registry for a provider.

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Default request timeout applied when `timeout_ms` is absent.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
/// Default number of attempts for retried (embedding) calls.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default delay before the second attempt.
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1_000;
/// Default upper bound on a single backoff delay.
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 10_000;

/// Settings for one provider. Every field is optional; each adapter applies
/// its own documented defaults for absent fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProviderConfig {
    /// API credential. Never printed by `Debug`.
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: Option<SecretString>,
    /// Base endpoint, e.g. `http://localhost:11434`.
    #[validate(url)]
    pub base_url: Option<String>,
    pub chat_model: Option<String>,
    pub embedding_model: Option<String>,
    #[validate(range(min = 1))]
    pub timeout_ms: Option<u64>,
    #[validate(range(min = 1))]
    pub max_attempts: Option<u32>,
    pub initial_backoff_ms: Option<u64>,
    pub max_backoff_ms: Option<u64>,
    /// Provider-specific extension fields (e.g. `keep_alive`, `temperature`).
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = Some(model.into());
        self
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = Some(model.into());
        self
    }

    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub const fn with_backoff_ms(mut self, initial: u64, max: u64) -> Self {
        self.initial_backoff_ms = Some(initial);
        self.max_backoff_ms = Some(max);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// The credential, if present and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .filter(|k| !k.trim().is_empty())
    }

    /// Request timeout, falling back to [`DEFAULT_TIMEOUT_MS`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    /// Base URL with any trailing slash removed, or the adapter default.
    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }

    /// Fill fields absent here from `fallback`. Used to layer global settings
    /// under per-provider ones.
    pub fn or(mut self, fallback: &ProviderConfig) -> Self {
        if self.api_key.is_none() {
            self.api_key = fallback.api_key.clone();
        }
        self.base_url = self.base_url.or_else(|| fallback.base_url.clone());
        self.chat_model = self.chat_model.or_else(|| fallback.chat_model.clone());
        self.embedding_model = self
            .embedding_model
            .or_else(|| fallback.embedding_model.clone());
        self.timeout_ms = self.timeout_ms.or(fallback.timeout_ms);
        self.max_attempts = self.max_attempts.or(fallback.max_attempts);
        self.initial_backoff_ms = self.initial_backoff_ms.or(fallback.initial_backoff_ms);
        self.max_backoff_ms = self.max_backoff_ms.or(fallback.max_backoff_ms);
        for (key, value) in &fallback.options {
            self.options
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }
}

/// Top-level settings: which provider to use plus per-provider sections.
///
/// ```json
/// {
///   "provider": "ollama",
///   "timeout_ms": 30000,
///   "providers": {
///     "ollama": { "chat_model": "llama3.2" },
///     "gemini": { "api_key": "..." }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LlmConfig {
    /// Provider selector, matched case-insensitively against the registry.
    pub provider: String,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub initial_backoff_ms: Option<u64>,
    #[serde(default)]
    pub max_backoff_ms: Option<u64>,
    #[serde(default)]
    #[validate(nested)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl LlmConfig {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            timeout_ms: None,
            max_attempts: None,
            initial_backoff_ms: None,
            max_backoff_ms: None,
            providers: HashMap::new(),
        }
    }

    pub fn with_provider_config(mut self, name: impl Into<String>, config: ProviderConfig) -> Self {
        self.providers.insert(name.into().to_lowercase(), config);
        self
    }

    /// Whether a per-provider section exists for `name` (case-insensitive).
    pub fn has_provider_config(&self, name: &str) -> bool {
        self.providers
            .keys()
            .any(|key| key.eq_ignore_ascii_case(name.trim()))
    }

    /// Effective configuration for `name`: its own section layered over the
    /// global timeout and retry tuning.
    pub fn provider_config(&self, name: &str) -> ProviderConfig {
        let globals = ProviderConfig {
            timeout_ms: self.timeout_ms,
            max_attempts: self.max_attempts,
            initial_backoff_ms: self.initial_backoff_ms,
            max_backoff_ms: self.max_backoff_ms,
            ..Default::default()
        };
        let own = self
            .providers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
            .map(|(_, cfg)| cfg.clone())
            .unwrap_or_default();
        own.or(&globals)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(SecretString::from))
}
