//! Events produced by a backend's decoded response stream.

/// One decoded item of a streaming chat completion.
///
/// Events arrive in strict order and the sequence terminates exactly once:
/// with [`StreamEvent::Done`], with stream exhaustion (treated identically
/// to `Done`), or with an `Err` item carrying a [`crate::ChatError`]. Errors
/// travel as the `Err` arm of the stream item rather than a third variant,
/// and are terminal by construction because the consumer stops pulling
/// after one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A non-empty fragment of the assistant's reply. Fragments concatenate
    /// in arrival order to form the full message; an empty fragment is never
    /// yielded.
    Delta(String),
    /// The server signalled the end of the reply.
    Done,
}
