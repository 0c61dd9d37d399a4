//! Ollama Mock API tests
//!
//! These tests verify that the Ollama adapter talks to `/api/chat` and
//! `/api/embed` the way the Ollama API documentation describes, and that the
//! chat/embedding failure policies hold against a real HTTP server.
//! Reference: https://github.com/ollama/ollama/blob/main/docs/api.md

#![cfg(feature = "ollama")]

use futures::StreamExt;
use llm_providers::prelude::*;
use llm_providers::providers::ollama::OllamaProvider;
use llm_providers::traits::APOLOGY_MESSAGE;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a non-streaming chat response based on official Ollama API docs
fn create_chat_response() -> serde_json::Value {
    json!({
        "model": "llama3.2",
        "created_at": "2023-12-12T14:13:43.416799Z",
        "message": {
            "role": "assistant",
            "content": "Hello! How are you today?"
        },
        "done": true,
        "total_duration": 5191566416u64,
        "prompt_eval_count": 26,
        "eval_count": 298
    })
}

fn create_embed_response() -> serde_json::Value {
    json!({
        "model": "nomic-embed-text",
        "embeddings": [[0.010071029, -0.0017594862, 0.05007221, 0.04692972]]
    })
}

fn config_for(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new()
        .with_base_url(server.uri())
        .with_backoff_ms(1, 5)
}

#[tokio::test]
async fn test_ollama_chat_non_streaming() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "model": "llama3.2",
            "messages": [
                {"role": "system", "content": "You are terse."},
                {"role": "user", "content": "Hello!"}
            ],
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_chat_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chat = OllamaProvider::new()
        .create_chat(&config_for(&mock_server))
        .unwrap();

    let response = chat
        .answer_question(vec![
            ChatMessage::system("You are terse."),
            ChatMessage::user("Hello!"),
        ])
        .await;

    assert!(!response.is_degraded());
    assert_eq!(response.role, MessageRole::Assistant);
    assert_eq!(response.content, "Hello! How are you today?");
    assert_eq!(response.model.as_deref(), Some("llama3.2"));
}

#[tokio::test]
async fn test_ollama_chat_forwards_options_and_keep_alive() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "qwen2.5",
            "options": {"temperature": 0.3},
            "keep_alive": "10m"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_chat_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server)
        .with_chat_model("qwen2.5")
        .with_option("temperature", json!(0.3))
        .with_option("keep_alive", json!("10m"));
    let chat = OllamaProvider::new().create_chat(&config).unwrap();

    let response = chat.answer_question(vec![ChatMessage::user("Hi")]).await;
    assert!(!response.is_degraded());
}

#[tokio::test]
async fn test_ollama_error_response_degrades_chat() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "model 'invalid-model' not found, try pulling it first"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chat = OllamaProvider::new()
        .create_chat(&config_for(&mock_server).with_chat_model("invalid-model"))
        .unwrap();

    let response = chat.answer_question(vec![ChatMessage::user("Hi")]).await;
    assert!(response.is_degraded());
    assert_eq!(response.content, APOLOGY_MESSAGE);
}

#[tokio::test]
async fn test_ollama_chat_is_not_retried_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chat = OllamaProvider::new()
        .create_chat(&config_for(&mock_server).with_max_attempts(5))
        .unwrap();

    let response = chat.answer_question(vec![ChatMessage::user("Hi")]).await;
    assert!(response.is_degraded());
}

#[tokio::test]
async fn test_ollama_slow_chat_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(create_chat_response())
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let chat = OllamaProvider::new()
        .create_chat(&config_for(&mock_server).with_timeout_ms(100))
        .unwrap();

    let started = std::time::Instant::now();
    let response = chat.answer_question(vec![ChatMessage::user("Hi")]).await;
    assert!(response.is_degraded());
    assert!(started.elapsed() < std::time::Duration::from_secs(4));
}

#[tokio::test]
async fn test_ollama_chat_stream_yields_single_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_chat_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chat = OllamaProvider::new()
        .create_chat(&config_for(&mock_server))
        .unwrap();

    let items: Vec<ChatResponse> = chat
        .answer_question_stream(vec![ChatMessage::user("Hello!")])
        .collect()
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "Hello! How are you today?");
}

#[tokio::test]
async fn test_ollama_embed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .and(body_json(json!({
            "model": "nomic-embed-text",
            "input": "Why is the sky blue?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_embed_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let embedder = OllamaProvider::new()
        .create_embedder(&config_for(&mock_server))
        .unwrap();

    let response = embedder.embed("Why is the sky blue?").await.unwrap();
    assert_eq!(response.dimension(), 4);
    assert!((response.embedding[2] - 0.050_072_21).abs() < 1e-6);
    assert_eq!(response.model.as_deref(), Some("nomic-embed-text"));
}

#[tokio::test]
async fn test_ollama_embed_retries_server_errors_then_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "busy"})))
        .expect(3)
        .mount(&mock_server)
        .await;

    let embedder = OllamaProvider::new()
        .create_embedder(&config_for(&mock_server).with_max_attempts(3))
        .unwrap();

    let error = embedder.embed("text").await.unwrap_err();
    assert!(error.is_retryable());
    assert_eq!(error.status_code(), Some(500));
}

#[tokio::test]
async fn test_ollama_embed_recovers_after_transient_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_embed_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let embedder = OllamaProvider::new()
        .create_embedder(&config_for(&mock_server))
        .unwrap();

    let response = embedder.embed("text").await.unwrap();
    assert_eq!(response.dimension(), 4);
}

#[tokio::test]
async fn test_ollama_embed_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid input type"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let embedder = OllamaProvider::new()
        .create_embedder(&config_for(&mock_server).with_max_attempts(4))
        .unwrap();

    let error = embedder.embed("text").await.unwrap_err();
    assert!(matches!(error, LlmError::InvalidInput(_)));
}

#[tokio::test]
async fn test_ollama_embed_rejects_empty_vector() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "nomic-embed-text",
            "embeddings": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let embedder = OllamaProvider::new()
        .create_embedder(&config_for(&mock_server))
        .unwrap();

    let error = embedder.embed("text").await.unwrap_err();
    assert!(matches!(error, LlmError::ParseError(_)));
}

#[tokio::test]
async fn test_ollama_empty_answer_degrades_chat() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2",
            "message": {"role": "assistant", "content": ""},
            "done": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chat = OllamaProvider::new()
        .create_chat(&config_for(&mock_server))
        .unwrap();

    let response = chat.answer_question(vec![ChatMessage::user("Hi")]).await;
    assert!(response.is_degraded());
    assert_eq!(response.content, APOLOGY_MESSAGE);
}
