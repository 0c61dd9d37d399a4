//! Gemini chat capability (`models/{model}:generateContent`).

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

use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use super::{DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, PROVIDER_ID, model_path};

#[derive(Clone)]
pub struct GeminiChat {
    base_url: String,
    model: String,
    timeout: Duration,
    headers: HeaderMap,
    generation_config: Option<serde_json::Map<String, serde_json::Value>>,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for GeminiChat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiChat")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiChat {
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
            generation_config: (!config.options.is_empty()).then(|| config.options.clone()),
            transport,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(&self, messages: &[ChatMessage]) -> Result<serde_json::Value, LlmError> {
        let contents = normalize(messages, &Dialect::GEMINI)
            .into_iter()
            .map(|m| Content {
                role: Some(m.role.to_string()),
                parts: vec![Part { text: m.content }],
            })
            .collect();
        let body = GenerateContentRequest {
            contents,
            generation_config: self.generation_config.as_ref(),
        };
        Ok(serde_json::to_value(body)?)
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        let body = self.build_request_body(messages)?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url,
            model_path(&self.model)
        );
        let response: GenerateContentResponse = post_json(
            self.transport.as_ref(),
            PROVIDER_ID,
            url,
            self.headers.clone(),
            body,
        )
        .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let model = response.model_version.unwrap_or_else(|| self.model.clone());
        Ok(ChatResponse::try_new(text, PROVIDER_ID)?.with_model(model))
    }
}

#[async_trait]
impl ChatCapability for GeminiChat {
    async fn answer_question(&self, messages: Vec<ChatMessage>) -> ChatResponse {
        answer_or_apologize(PROVIDER_ID, &self.model, self.timeout, self.chat(&messages)).await
    }

    fn answer_question_stream(&self, messages: Vec<ChatMessage>) -> ChatStream {
        let this = self.clone();
        single_response_stream(async move { this.answer_question(messages).await })
    }
}
