//! Streaming types and the single-chunk shim.
//!
//! None of the bundled backends are called in incremental mode, so the chat
//! stream carries exactly one fragment: the complete answer. Callers written
//! against the streaming contract keep working; they just wait for the whole
//! answer before the first item.

use std::future::Future;
use std::pin::Pin;

use futures::Stream;

use crate::types::ChatResponse;

/// Stream of answer fragments.
pub type ChatStream = Pin<Box<dyn Stream<Item = ChatResponse> + Send>>;

/// Wrap a pending answer as a one-item stream.
///
/// Nothing runs until the stream is first polled; after the single item the
/// stream ends and cannot be restarted.
pub fn single_response_stream<F>(answer: F) -> ChatStream
where
    F: Future<Output = ChatResponse> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        yield answer.await;
    })
}
