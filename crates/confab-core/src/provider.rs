//! The seam between the turn loop and a concrete chat backend.

use futures_core::stream::Stream;

use crate::error::Result;
use crate::event::StreamEvent;
use crate::message::Message;

/// A backend that can deliver the model's answer **incrementally**.
///
/// The returned stream is lazy, forward-only and not restartable: it yields
/// decoded [`StreamEvent`]s one at a time, in arrival order, and terminates
/// exactly once. Dropping the stream closes the underlying connection, which
/// is how cancellation releases the transport on every exit path.
///
/// The trait is intentionally minimal — one associated stream type, one
/// method. A failed turn is retried by calling [`Self::stream_chat`] again
/// with the (re-sent) full history; the provider itself never retries.
pub trait ChatStreamProvider: Send + Sync {
    /// The stream type returned by [`Self::stream_chat`].
    type Events<'s>: Stream<Item = Result<StreamEvent>> + Send + 's
    where
        Self: 's;

    /// Start a streaming chat completion over the given history.
    ///
    /// The slice is only read while building the request; the provider does
    /// not hold on to it.
    fn stream_chat<'s>(&'s self, messages: &[Message]) -> Self::Events<'s>;
}
