//! Capability traits implemented by every provider adapter.

mod chat;
mod embedding;
mod provider;

pub use chat::{APOLOGY_MESSAGE, ChatCapability};
pub use embedding::EmbeddingCapability;
pub use provider::ProviderFactory;
