//! Gemini Mock API tests
//!
//! Verifies the `generateContent` / `embedContent` wire format, API-key
//! header, and system-message folding against a mock server.
//! Reference: https://ai.google.dev/api/generate-content

#![cfg(feature = "gemini")]

use llm_providers::prelude::*;
use llm_providers::providers::gemini::GeminiProvider;
use llm_providers::traits::APOLOGY_MESSAGE;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_generate_content_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{"text": text}],
                "role": "model"
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 8,
            "totalTokenCount": 20
        },
        "modelVersion": "gemini-2.0-flash-001"
    })
}

fn config_for(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new()
        .with_api_key("test-key")
        .with_base_url(server.uri())
        .with_backoff_ms(1, 5)
}

#[tokio::test]
async fn test_gemini_chat_merges_system_instructions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "[System Instructions: A]\n\nB"}]}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_generate_content_response("Sure.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let chat = GeminiProvider::new()
        .create_chat(&config_for(&mock_server))
        .unwrap();

    let response = chat
        .answer_question(vec![ChatMessage::system("A"), ChatMessage::user("B")])
        .await;

    assert!(!response.is_degraded());
    assert_eq!(response.content, "Sure.");
    assert_eq!(response.model.as_deref(), Some("gemini-2.0-flash-001"));
}

#[tokio::test]
async fn test_gemini_chat_sends_assistant_turns_as_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-pro:generateContent"))
        .and(body_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "Hi"}]},
                {"role": "model", "parts": [{"text": "Hello"}]},
                {"role": "user", "parts": [{"text": "Bye"}]}
            ],
            "generationConfig": {"maxOutputTokens": 64}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(create_generate_content_response("Goodbye")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server)
        .with_chat_model("models/gemini-1.5-pro")
        .with_option("maxOutputTokens", json!(64));
    let chat = GeminiProvider::new().create_chat(&config).unwrap();

    let response = chat
        .answer_question(vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello"),
            ChatMessage::user("Bye"),
        ])
        .await;
    assert_eq!(response.content, "Goodbye");
}

#[tokio::test]
async fn test_gemini_empty_candidates_degrade_chat() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chat = GeminiProvider::new()
        .create_chat(&config_for(&mock_server))
        .unwrap();

    let response = chat.answer_question(vec![ChatMessage::user("Hi")]).await;
    assert!(response.is_degraded());
}

#[tokio::test]
async fn test_gemini_blank_candidate_text_degrades_chat() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_generate_content_response("  ")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let chat = GeminiProvider::new()
        .create_chat(&config_for(&mock_server))
        .unwrap();

    let response = chat.answer_question(vec![ChatMessage::user("Hi")]).await;
    assert!(response.is_degraded());
    assert_eq!(response.content, APOLOGY_MESSAGE);
}

#[tokio::test]
async fn test_gemini_embed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/text-embedding-004:embedContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "model": "models/text-embedding-004",
            "content": {"parts": [{"text": "What is the meaning of life?"}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": {"values": [0.25, -0.5, 0.125]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let embedder = GeminiProvider::new()
        .create_embedder(&config_for(&mock_server))
        .unwrap();

    let response = embedder.embed("What is the meaning of life?").await.unwrap();
    assert_eq!(response.embedding, vec![0.25, -0.5, 0.125]);
    assert_eq!(embedder.embedding_model(), "text-embedding-004");
}

#[tokio::test]
async fn test_gemini_rate_limit_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/text-embedding-004:embedContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let embedder = GeminiProvider::new()
        .create_embedder(&config_for(&mock_server).with_max_attempts(2))
        .unwrap();

    let error = embedder.embed("text").await.unwrap_err();
    assert!(matches!(error, LlmError::RateLimitError(_)));
}

#[tokio::test]
async fn test_gemini_invalid_key_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/text-embedding-004:embedContent"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let embedder = GeminiProvider::new()
        .create_embedder(&config_for(&mock_server))
        .unwrap();

    let error = embedder.embed("text").await.unwrap_err();
    assert!(matches!(error, LlmError::AuthenticationError(_)));
    assert!(error.to_string().contains("API key not valid"));
}
