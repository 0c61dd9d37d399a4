//! Core error types.

use thiserror::Error;

/// Unified error type for provider construction and backend calls.
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// A required configuration field is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The provider selector does not name a registered provider.
    #[error("Unknown provider '{name}'; available providers: {}", .available.join(", "))]
    UnknownProvider {
        name: String,
        available: Vec<String>,
    },

    /// Network-level failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-success status returned by the backend.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The deadline of the timeout guard elapsed first.
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// The backend answered with a payload we could not interpret.
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LlmError {
    /// Create an API error without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create an API error carrying the structured response body.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status code associated with this error, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether a repeated attempt could plausibly succeed.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::TimeoutError(_) | Self::RateLimitError(_) => true,
            Self::ApiError { code, .. } => *code >= 500 && *code <= 599,
            _ => false,
        }
    }

    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutError(_))
    }
}
