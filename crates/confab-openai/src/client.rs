use async_stream::try_stream;
use futures_core::stream::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client as HttpClient,
    header::{ACCEPT, HeaderValue},
};
use std::time::Duration;
use tracing::warn;

use confab_core::StreamEvent;

use crate::{api::ChatCompletionRequest, config::ClientConfig, error::ApiError, sse::decode_sse};

/// Minimal HTTP client for an OpenAI-compatible *chat/completions* endpoint.
///
/// * Streaming only (one request ▶ one incremental reply).
/// * Shares a single `reqwest::Client`, so cloning `ChatClient` is cheap.
/// * Never retries — a failed turn is retried by the caller, which re-sends
///   the full history.
#[derive(Clone)]
pub struct ChatClient {
    config: ClientConfig,
    http: HttpClient,
}

impl ChatClient {
    /// Convenience constructor building a default `reqwest` client: 30 s
    /// connect and per-read timeouts, Rustls TLS. The per-read timeout
    /// bounds the gap between chunks without capping the total stream
    /// duration, so a long reply is never cut off mid-sentence.
    pub fn new(config: ClientConfig) -> Self {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(30))
            .read_timeout(Duration::from_secs(30))
            .build()
            .expect("building reqwest client");

        Self::with_http(config, http)
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, etc.
    pub fn with_http(config: ClientConfig, http: HttpClient) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST the request and hand back the streaming response.
    ///
    /// A non-2xx status is drained into [`ApiError::Api`] here, before any
    /// event is yielded, so the caller sees exactly one error and no deltas.
    async fn send(&self, request: &ChatCompletionRequest) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, "chat completion request rejected");
            return Err(ApiError::Api { status, body });
        }

        Ok(resp)
    }

    /// Perform a streaming chat completion.
    ///
    /// The response body is consumed incrementally via `bytes_stream` —
    /// never buffered whole — and decoded by [`decode_sse`]. Dropping the
    /// returned stream aborts the request and closes the connection.
    pub fn chat_completion_stream(
        &self,
        request: ChatCompletionRequest,
    ) -> impl Stream<Item = Result<StreamEvent, ApiError>> + '_ {
        try_stream! {
            let resp = self.send(&request).await?;

            let events = decode_sse(resp.bytes_stream());
            futures_util::pin_mut!(events);

            while let Some(event) = events.next().await {
                let event = event?;
                yield event;
            }
        }
    }
}
