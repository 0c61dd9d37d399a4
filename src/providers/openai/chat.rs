//! OpenAI chat capability (`/chat/completions`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::json;

use crate::config::ProviderConfig;
use crate::error::LlmError;
use crate::execution::http::{HttpTransport, post_json};
use crate::execution::policy::answer_or_apologize;
use crate::normalize::{Dialect, normalize};
use crate::streaming::{ChatStream, single_response_stream};
use crate::traits::ChatCapability;
use crate::types::{ChatMessage, ChatResponse};

use super::types::ChatCompletionResponse;
use super::{DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, PROVIDER_ID};

#[derive(Clone)]
pub struct OpenAiChat {
    base_url: String,
    model: String,
    timeout: Duration,
    headers: HeaderMap,
    options: serde_json::Map<String, serde_json::Value>,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for OpenAiChat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChat")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiChat {
    pub(super) fn new(
        config: &ProviderConfig,
        headers: HeaderMap,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            model: config
                .chat_model
                .clone()
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            timeout: config.timeout(),
            headers,
            options: config.options.clone(),
            transport,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(&self, messages: &[ChatMessage]) -> Result<serde_json::Value, LlmError> {
        let mut body = serde_json::Map::new();
        for (key, value) in &self.options {
            body.insert(key.clone(), value.clone());
        }
        body.insert("model".to_string(), json!(self.model));
        body.insert(
            "messages".to_string(),
            serde_json::to_value(normalize(messages, &Dialect::OPENAI))?,
        );
        body.insert("stream".to_string(), json!(false));
        Ok(serde_json::Value::Object(body))
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        let body = self.build_request_body(messages)?;
        let url = format!("{}/chat/completions", self.base_url);
        let response: ChatCompletionResponse = post_json(
            self.transport.as_ref(),
            PROVIDER_ID,
            url,
            self.headers.clone(),
            body,
        )
        .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        let model = response.model.unwrap_or_else(|| self.model.clone());
        Ok(ChatResponse::try_new(content, PROVIDER_ID)?.with_model(model))
    }
}

#[async_trait]
impl ChatCapability for OpenAiChat {
    async fn answer_question(&self, messages: Vec<ChatMessage>) -> ChatResponse {
        answer_or_apologize(PROVIDER_ID, &self.model, self.timeout, self.chat(&messages)).await
    }

    fn answer_question_stream(&self, messages: Vec<ChatMessage>) -> ChatStream {
        let this = self.clone();
        single_response_stream(async move { this.answer_question(messages).await })
    }
}
