//! Unified error type exposed by **`confab-core`**.
//!
//! Backend crates convert their internal errors into one of these variants
//! before bubbling them up to the turn loop. This keeps the public API small
//! while still conveying rich diagnostic information.
//!
//! Note what is *not* here: a malformed individual stream event is skipped
//! inside the decoder and never becomes an error, and user cancellation is a
//! normal partial-completion path, not a failure.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or invalid credentials. Fatal to starting a session, never to
    /// the process.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection, timeout or non-2xx failure forwarded from the backend.
    /// Aborts the current turn only; the session continues.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The event stream ended mid-message without the completion marker.
    /// Distinguishes a dropped connection from a clean finish.
    #[error("stream ended before completion")]
    Truncated,
}
