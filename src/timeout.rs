//! Deadline wrapper for backend calls.

use std::future::Future;
use std::time::Duration;

use crate::error::LlmError;

/// Run `operation` with a deadline.
///
/// The operation and the timer race in the calling task. If the timer wins,
/// the operation future is dropped, which aborts an in-flight `reqwest`
/// request; transports that cannot be cancelled simply stop being observed.
pub async fn with_timeout<F, T>(operation: F, timeout: Duration) -> Result<T, LlmError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    tokio::time::timeout(timeout, operation)
        .await
        .map_err(|_| {
            LlmError::TimeoutError(format!("operation timed out after {timeout:?}"))
        })?
}
