//! # llm-providers
//!
//! A small, provider-agnostic layer for chat completion and text embedding
//! against hosted or local LLM backends.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Capability Traits**: `ChatCapability` and `EmbeddingCapability` hide the backend.
//! - **Registry**: backends are looked up by a case-insensitive name at startup.
//! - **Failure Policy**: chat degrades to an apology, embeddings retry with backoff.
//! - **Dialect Normalization**: system prompts are folded in for backends without a system role.
//! - **Injectable Transport**: every adapter talks HTTP through `HttpTransport`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use llm_providers::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LlmError> {
//!     let config = LlmConfig::new("ollama");
//!     let clients = ProviderRegistry::with_builtins().from_config(&config)?;
//!
//!     let answer = clients
//!         .chat
//!         .answer_question(vec![
//!             ChatMessage::system("Answer in one sentence."),
//!             ChatMessage::user("What is Rust?"),
//!         ])
//!         .await;
//!     println!("{}", answer.content);
//!
//!     let vector = clients.embedder.embed("What is Rust?").await?;
//!     println!("{} dimensions", vector.dimension());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `ollama`, `gemini`, `openai`: individual backends
//! - `all-providers` (default): all of the above

pub mod config;
pub mod error;
pub mod execution;
pub mod normalize;
pub mod providers;
pub mod registry;
pub mod retry;
pub mod streaming;
pub mod telemetry;
pub mod timeout;
pub mod traits;
pub mod types;

pub use config::{LlmConfig, ProviderConfig};
pub use error::LlmError;
pub use registry::{ProviderClients, ProviderRegistry};
pub use retry::{RetryPolicy, with_backoff};
pub use timeout::with_timeout;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{LlmConfig, ProviderConfig};
    pub use crate::error::LlmError;
    pub use crate::normalize::{Dialect, normalize};
    pub use crate::registry::{ProviderClients, ProviderRegistry};
    pub use crate::retry::{RetryPolicy, with_backoff};
    pub use crate::streaming::ChatStream;
    pub use crate::timeout::with_timeout;
    pub use crate::traits::{ChatCapability, EmbeddingCapability, ProviderFactory};
    pub use crate::types::{ChatMessage, ChatResponse, EmbeddingResponse, MessageRole};
}
