//! Message normalization into backend dialects.
//!
//! Backends disagree on two things: whether a `system` role exists, and what
//! the assistant role is called on the wire. Both are captured by a
//! [`Dialect`] table entry so adding a backend means adding a constant, not a
//! code path.

use serde::Serialize;

use crate::types::{ChatMessage, MessageRole};

/// Wire conventions of one backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub name: &'static str,
    /// Whether system messages can be sent as-is.
    pub supports_system_role: bool,
    pub system_label: &'static str,
    pub user_label: &'static str,
    pub assistant_label: &'static str,
}

impl Dialect {
    pub const OLLAMA: Dialect = Dialect {
        name: "ollama",
        supports_system_role: true,
        system_label: "system",
        user_label: "user",
        assistant_label: "assistant",
    };

    pub const OPENAI: Dialect = Dialect {
        name: "openai",
        supports_system_role: true,
        system_label: "system",
        user_label: "user",
        assistant_label: "assistant",
    };

    /// Gemini `contents` accept only `user` and `model`.
    pub const GEMINI: Dialect = Dialect {
        name: "gemini",
        supports_system_role: false,
        // Unused: system messages are merged away before roles are mapped.
        system_label: "user",
        user_label: "user",
        assistant_label: "model",
    };

    pub const fn role_label(&self, role: MessageRole) -> &'static str {
        match role {
            MessageRole::System => self.system_label,
            MessageRole::User => self.user_label,
            MessageRole::Assistant => self.assistant_label,
        }
    }
}

/// A message in a backend's role vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialectMessage {
    pub role: &'static str,
    pub content: String,
}

/// Fold system messages into the first user message for dialects without a
/// system role; other dialects get the input back unchanged.
///
/// System contents are joined with a blank line and prepended to the first
/// user message as `[System Instructions: <text>]` followed by a blank line.
/// With no user message to carry it, the system text is dropped.
pub fn merge_system_messages(messages: &[ChatMessage], dialect: &Dialect) -> Vec<ChatMessage> {
    if dialect.supports_system_role {
        return messages.to_vec();
    }

    let (system, rest): (Vec<&ChatMessage>, Vec<&ChatMessage>) = messages
        .iter()
        .partition(|m| m.role() == MessageRole::System);

    if system.is_empty() {
        return rest.into_iter().cloned().collect();
    }

    let instructions = system
        .iter()
        .map(|m| m.content())
        .collect::<Vec<_>>()
        .join("\n\n");

    let first_user = rest.iter().position(|m| m.role() == MessageRole::User);
    if first_user.is_none() {
        tracing::debug!(
            dialect = dialect.name,
            "no user message to carry system instructions; dropping them"
        );
    }

    rest.into_iter()
        .enumerate()
        .map(|(idx, m)| {
            if Some(idx) == first_user {
                ChatMessage::user(format!(
                    "[System Instructions: {instructions}]\n\n{}",
                    m.content()
                ))
            } else {
                m.clone()
            }
        })
        .collect()
}

/// Convert provider-agnostic messages into `dialect`'s wire roles.
///
/// Pure and deterministic: identical input always yields identical output.
pub fn normalize(messages: &[ChatMessage], dialect: &Dialect) -> Vec<DialectMessage> {
    merge_system_messages(messages, dialect)
        .into_iter()
        .map(|m| DialectMessage {
            role: dialect.role_label(m.role()),
            content: m.content().to_string(),
        })
        .collect()
}
