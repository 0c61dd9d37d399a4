//! Error Handling Module
//!
//! This module provides the error type shared by every layer of the crate:
//! - Core error type (`LlmError`) and its retry classification
//! - HTTP failure classification (`classify_http_error`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_providers::error::LlmError;
//!
//! let error = LlmError::api_error(503, "Service unavailable");
//! assert!(error.is_retryable());
//! ```

// Module declarations
mod classify;
mod conversions;
pub mod types;

// Re-exports for public API
pub use classify::classify_http_error;
pub use types::*;
