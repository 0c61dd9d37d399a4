//! Provider-agnostic request and result types.
//!
//! `ChatResponse` and `EmbeddingResponse` are the only result shapes that leave
//! an adapter; backend wire structs stay private to their provider module.

mod chat;
mod embedding;

pub use chat::{ChatMessage, ChatResponse, MessageRole};
pub use embedding::EmbeddingResponse;
