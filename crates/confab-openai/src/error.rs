use confab_core::ChatError;
use reqwest::StatusCode;

/// High-level error type covering every failure mode the backend can hit.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn't serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("endpoint returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("stream ended before the completion marker")]
    Truncated,
}

impl From<ApiError> for ChatError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Truncated => ChatError::Truncated,
            other => ChatError::Backend(Box::new(other)),
        }
    }
}
