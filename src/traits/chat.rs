//! Chat capability trait

use async_trait::async_trait;

use crate::streaming::ChatStream;
use crate::types::{ChatMessage, ChatResponse};

/// Text used in place of an answer when the backend call fails.
pub const APOLOGY_MESSAGE: &str =
    "I'm sorry, I couldn't generate a response right now. Please try again in a moment.";

#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Answer the conversation.
    ///
    /// Never fails: transport errors and timeouts are logged and turned into a
    /// degraded response carrying an apology, so conversational callers always
    /// receive a well-formed assistant turn.
    async fn answer_question(&self, messages: Vec<ChatMessage>) -> ChatResponse;

    /// Streaming variant of [`answer_question`](Self::answer_question).
    fn answer_question_stream(&self, messages: Vec<ChatMessage>) -> ChatStream;
}
