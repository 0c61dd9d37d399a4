//! Provider adapters, one module per backend.
//!
//! Each module exposes a [`ProviderFactory`](crate::traits::ProviderFactory)
//! implementation plus the concrete chat and embedding capabilities it builds.

#[cfg(feature = "gemini")]
pub mod gemini;
#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "openai")]
pub mod openai;
