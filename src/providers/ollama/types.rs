//! Ollama wire types (private to the adapter).

use serde::{Deserialize, Serialize};

use crate::normalize::DialectMessage;

#[derive(Debug, Serialize)]
pub(super) struct OllamaChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<DialectMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<&'a serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OllamaChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct OllamaResponseMessage {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(super) struct OllamaEmbedRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<&'a serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OllamaEmbedResponse {
    #[serde(default)]
    pub embeddings: Vec<Vec<f32>>,
}
