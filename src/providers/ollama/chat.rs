//! Ollama Chat Capability Implementation
//!
//! Implements [`ChatCapability`] against the `/api/chat` endpoint with
//! `stream: false`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::config::ProviderConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransport, post_json};
use crate::execution::policy::answer_or_apologize;
use crate::normalize::{Dialect, normalize};
use crate::streaming::{ChatStream, single_response_stream};
use crate::traits::ChatCapability;
use crate::types::{ChatMessage, ChatResponse};

use super::types::{OllamaChatRequest, OllamaChatResponse};
use super::{DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, PROVIDER_ID, split_options};

/// Ollama chat capability
#[derive(Clone)]
pub struct OllamaChat {
    base_url: String,
    model: String,
    timeout: Duration,
    keep_alive: Option<serde_json::Value>,
    options: Option<serde_json::Map<String, serde_json::Value>>,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for OllamaChat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaChat")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OllamaChat {
    pub fn new(config: &ProviderConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let (keep_alive, options) = split_options(config);
        Self {
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            model: config
                .chat_model
                .clone()
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            timeout: config.timeout(),
            keep_alive,
            options,
            transport,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(&self, messages: &[ChatMessage]) -> Result<serde_json::Value, LlmError> {
        let body = OllamaChatRequest {
            model: &self.model,
            messages: normalize(messages, &Dialect::OLLAMA),
            stream: false,
            options: self.options.as_ref(),
            keep_alive: self.keep_alive.as_ref(),
        };
        Ok(serde_json::to_value(body)?)
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        let body = self.build_request_body(messages)?;
        let url = format!("{}/api/chat", self.base_url);
        let response: OllamaChatResponse = post_json(
            self.transport.as_ref(),
            PROVIDER_ID,
            url,
            HeaderMap::new(),
            body,
        )
        .await?;

        let model = response.model.unwrap_or_else(|| self.model.clone());
        Ok(ChatResponse::try_new(response.message.content, PROVIDER_ID)?.with_model(model))
    }
}

#[async_trait]
impl ChatCapability for OllamaChat {
    async fn answer_question(&self, messages: Vec<ChatMessage>) -> ChatResponse {
        answer_or_apologize(PROVIDER_ID, &self.model, self.timeout, self.chat(&messages)).await
    }

    fn answer_question_stream(&self, messages: Vec<ChatMessage>) -> ChatStream {
        let this = self.clone();
        single_response_stream(async move { this.answer_question(messages).await })
    }
}
