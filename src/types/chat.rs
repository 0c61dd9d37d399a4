//! Chat message and response types.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single conversation turn.
///
/// Fields are private so a message cannot change after construction; the
/// order of messages in a conversation is significant and preserved by every
/// layer of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: MessageRole,
    content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub const fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Final assistant turn returned by a chat capability.
///
/// Either fully populated from the backend answer, or a degraded apology
/// produced when the backend call failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub role: MessageRole,
    pub content: String,
    /// Model that produced the answer, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// `true` when `content` is the fallback apology rather than a backend answer.
    #[serde(default)]
    pub degraded: bool,
}

impl ChatResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            model: None,
            degraded: false,
        }
    }

    /// Build a response from backend output, rejecting blank answers so they
    /// are handled like any other failed call.
    pub fn try_new(content: impl Into<String>, provider_id: &str) -> Result<Self, LlmError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(LlmError::ParseError(format!(
                "{provider_id} returned an empty answer"
            )));
        }
        Ok(Self::new(content))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Apology answer used in place of a failed backend call.
    pub fn degraded(content: impl Into<String>) -> Self {
        Self {
            degraded: true,
            ..Self::new(content)
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}
