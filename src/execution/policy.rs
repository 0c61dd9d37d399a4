//! Failure policies applied around backend calls.
//!
//! Chat and embedding failures are handled asymmetrically: a failed chat turn
//! degrades into an apology (one bad turn), while a failed embedding is
//! retried and then surfaced (a missing vector would corrupt the index).

use std::future::Future;
use std::time::Duration;

use tracing::Instrument;

use crate::error::LlmError;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::timeout::with_timeout;
use crate::traits::APOLOGY_MESSAGE;
use crate::types::{ChatResponse, EmbeddingResponse};

/// Run a chat call under `timeout`, converting any failure into a degraded
/// apology response.
pub async fn answer_or_apologize<F>(
    provider: &'static str,
    model: &str,
    timeout: Duration,
    call: F,
) -> ChatResponse
where
    F: Future<Output = Result<ChatResponse, LlmError>>,
{
    let span = tracing::info_span!(
        "chat",
        provider,
        model,
        request_id = %uuid::Uuid::new_v4(),
    );

    async move {
        match with_timeout(call, timeout).await {
            Ok(response) => response,
            Err(error) if error.is_timeout() => {
                tracing::error!(
                    timeout = true,
                    timeout_ms = timeout.as_millis() as u64,
                    "chat request timed out; returning fallback answer"
                );
                ChatResponse::degraded(APOLOGY_MESSAGE)
            }
            Err(error) => {
                tracing::error!(
                    timeout = false,
                    error = %error,
                    "chat request failed; returning fallback answer"
                );
                ChatResponse::degraded(APOLOGY_MESSAGE)
            }
        }
    }
    .instrument(span)
    .await
}

/// Run an embedding call with backoff, each attempt bounded by `timeout`.
///
/// Only retryable errors (transport, timeout, rate limit, 5xx) trigger another
/// attempt. The final error is returned to the caller.
pub async fn embed_with_retry<F, Fut>(
    provider: &'static str,
    model: &str,
    policy: &RetryPolicy,
    timeout: Duration,
    mut call: F,
) -> Result<EmbeddingResponse, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<EmbeddingResponse, LlmError>>,
{
    let span = tracing::info_span!(
        "embed",
        provider,
        model,
        request_id = %uuid::Uuid::new_v4(),
    );
    let executor = RetryExecutor::new(policy.clone().with_retry_condition(LlmError::is_retryable));

    async move {
        executor
            .execute(|| with_timeout(call(), timeout))
            .await
            .inspect_err(|error| tracing::error!(error = %error, "embedding request failed"))
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn failed_chat_degrades_to_apology() {
        let response = answer_or_apologize("test", "m", Duration::from_secs(1), async {
            Err(LlmError::HttpError("connection refused".into()))
        })
        .await;
        assert!(response.is_degraded());
        assert!(!response.content.is_empty());
        assert_eq!(response.content, APOLOGY_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_chat_degrades_to_apology() {
        let response = answer_or_apologize("test", "m", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(ChatResponse::new("too late"))
        })
        .await;
        assert!(response.is_degraded());
    }

    #[tokio::test]
    async fn successful_chat_passes_through() {
        let response = answer_or_apologize("test", "m", Duration::from_secs(1), async {
            Ok(ChatResponse::new("hi").with_model("m"))
        })
        .await;
        assert!(!response.is_degraded());
        assert_eq!(response.content, "hi");
    }

    #[tokio::test(start_paused = true)]
    async fn embedding_retries_timeouts_then_fails() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        let policy = RetryPolicy::new()
            .with_max_attempts(3)
            .with_initial_delay(Duration::from_millis(5));

        let result = embed_with_retry("test", "m", &policy, Duration::from_millis(10), || {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(1)).await;
                EmbeddingResponse::try_new(vec![1.0], "m")
            }
        })
        .await;

        assert!(result.unwrap_err().is_timeout());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn embedding_does_not_retry_permanent_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        let policy = RetryPolicy::new().with_max_attempts(4);

        let result = embed_with_retry("test", "m", &policy, Duration::from_secs(1), || {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(LlmError::AuthenticationError("bad key".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(LlmError::AuthenticationError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
