//! HTTP failure classification.

use reqwest::header::HeaderMap;

use super::types::LlmError;

/// Classify an HTTP failure into a more specific error type with retry hints.
///
/// Inspects the status code, response body and headers so that callers (and
/// the retry executor) see `RateLimitError` / `AuthenticationError` / 5xx
/// `ApiError` rather than an opaque failure.
pub fn classify_http_error(
    provider_id: &str,
    status: u16,
    body_text: &str,
    headers: &HeaderMap,
) -> LlmError {
    // Limit body sample size to avoid noisy logs
    let body_sample = body_text.chars().take(200).collect::<String>();

    match status {
        429 => {
            let retry_after = headers
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            LlmError::RateLimitError(format!(
                "provider={provider_id} http=429 retry_after={retry_after} body_sample={body_sample}"
            ))
        }
        401 | 403 => LlmError::AuthenticationError(format!(
            "provider={provider_id} http={status} body_sample={body_sample}"
        )),
        404 => LlmError::NotFound(format!(
            "provider={provider_id} http=404 body_sample={body_sample}"
        )),
        400 | 413 | 415 | 422 => LlmError::InvalidInput(format!(
            "provider={provider_id} http={status} body_sample={body_sample}"
        )),
        _ => {
            let message = extract_error_message(body_text).unwrap_or_else(|| {
                if body_text.trim().is_empty() {
                    "api error".to_string()
                } else {
                    body_sample.clone()
                }
            });
            let details = match serde_json::from_str::<serde_json::Value>(body_text) {
                Ok(json) => serde_json::json!({
                    "status": status,
                    "provider": provider_id,
                    "response": json,
                }),
                Err(_) => serde_json::json!({
                    "status": status,
                    "provider": provider_id,
                    "raw": body_text,
                }),
            };
            LlmError::api_error_with_details(status, message, details)
        }
    }
}

/// Pull a human-readable message out of the common error envelopes:
/// `{"error": "..."}` (Ollama) and `{"error": {"message": "..."}}` (Gemini/OpenAI).
fn extract_error_message(body_text: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body_text).ok()?;
    let error = json.get("error")?;
    error
        .as_str()
        .or_else(|| error.get("message").and_then(|m| m.as_str()))
        .map(str::to_string)
}
