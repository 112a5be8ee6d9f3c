//! Client configuration and its builder.
//!
//! The configuration is immutable for the lifetime of a [`crate::ChatClient`]
//! and fully validated at construction time — there is no process-wide
//! mutable state to consult later. Loading values from the environment is a
//! convenience on the builder; rejecting incomplete configuration happens in
//! [`ClientConfigBuilder::build`], before any core component is constructed.

use std::env;

use confab_core::{ChatError, Result};

/// Model used when `MODEL_NAME` is not set.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Environment variables read by [`ClientConfigBuilder::from_env`].
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_BASE_URL: &str = "API_BASE_URL";
pub const ENV_MODEL: &str = "MODEL_NAME";

/// Validated, immutable settings for one client instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token sent in the `Authorization` header. Treat as secret.
    pub api_key: String,
    /// Endpoint base, guaranteed to carry no trailing slash.
    pub base_url: String,
    pub model: String,
    pub stream: bool,
}

/// Builder for [`ClientConfig`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use confab_openai::ClientConfigBuilder;
///
/// let config = ClientConfigBuilder::from_env()
///     .build()
///     .expect("API_KEY and API_BASE_URL must be set");
/// ```
///
/// Missing values only surface during [`Self::build`], so callers can layer
/// explicit setters over the environment before validation runs.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
}

impl ClientConfigBuilder {
    /// Create an *empty* builder. Remember to supply key and URL manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that reads `API_KEY`, `API_BASE_URL` and
    /// `MODEL_NAME` from the environment. Never panics; absent variables
    /// only matter at [`Self::build`] time.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(ENV_API_KEY).ok(),
            base_url: env::var(ENV_BASE_URL).ok(),
            model: env::var(ENV_MODEL).ok(),
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Finalise the builder.
    ///
    /// # Errors
    ///
    /// * [`ChatError::Config`] – if the API key or base URL is missing.
    pub fn build(self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ChatError::Config(format!("missing env variable: `{ENV_API_KEY}`")))?;
        let base_url = self
            .base_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ChatError::Config(format!("missing env variable: `{ENV_BASE_URL}`")))?;

        Ok(ClientConfig {
            api_key,
            // Avoids a double slash when the endpoint path is appended.
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            stream: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        let config = ClientConfigBuilder::new()
            .api_key("sk-test")
            .base_url("https://api.example.com/v1///")
            .build()
            .unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.stream);
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = ClientConfigBuilder::new()
            .base_url("https://api.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }
}
