//! HTTP execution: the injectable transport and the JSON POST helper every
//! adapter goes through.

pub mod transport;

pub use transport::{HttpTransport, HttpTransportRequest, HttpTransportResponse, ReqwestTransport};

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::{LlmError, classify_http_error};

/// POST `body` to `url` and decode the JSON answer.
///
/// Non-2xx statuses are classified with [`classify_http_error`] so the retry
/// layer can tell transient failures from permanent ones.
pub async fn post_json<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    provider_id: &str,
    url: String,
    headers: HeaderMap,
    body: serde_json::Value,
) -> Result<T, LlmError> {
    tracing::debug!(provider = provider_id, url = %url, "sending request");
    let response = transport
        .execute_json(HttpTransportRequest { url, headers, body })
        .await?;

    if !(200..300).contains(&response.status) {
        let text = String::from_utf8_lossy(&response.body);
        return Err(classify_http_error(
            provider_id,
            response.status,
            &text,
            &response.headers,
        ));
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        LlmError::ParseError(format!("Failed to parse {provider_id} response: {e}"))
    })
}
