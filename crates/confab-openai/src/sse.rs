//! Server-Sent-Events decoder: raw response bytes in, [`StreamEvent`]s out.
//!
//! The wire format is line based: each event is a line prefixed `data: `
//! carrying a JSON chunk, and the reply terminates with the sentinel line
//! `data: [DONE]`. Everything else — SSE comments, blank keep-alives — is
//! ignored. A malformed JSON payload is skipped without aborting the
//! stream; only a transport failure while pulling bytes is terminal.

use async_stream::try_stream;
use bytes::Bytes;
use futures_core::stream::Stream;
use futures_util::StreamExt;
use tracing::debug;

use confab_core::StreamEvent;

use crate::api::ChatCompletionChunk;
use crate::error::ApiError;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// Decode a byte stream into a lazy sequence of [`StreamEvent`]s.
///
/// Guarantees, in arrival order:
///
/// * only non-empty `choices[0].delta.content` fragments become
///   [`StreamEvent::Delta`]s;
/// * `data: [DONE]` yields [`StreamEvent::Done`] and stops consuming, even
///   if more bytes follow;
/// * a line that is not valid JSON is skipped and decoding continues;
/// * a transport error while pulling the next chunk becomes one terminal
///   `Err` item;
/// * EOF without the sentinel after at least one delta yields
///   [`ApiError::Truncated`] — a dropped connection is not a clean finish.
///   A zero-delta EOF ends the stream silently, equivalent to `Done` with
///   empty content.
pub fn decode_sse<B, E>(bytes: B) -> impl Stream<Item = Result<StreamEvent, ApiError>>
where
    B: Stream<Item = Result<Bytes, E>>,
    ApiError: From<E>,
{
    try_stream! {
        futures_util::pin_mut!(bytes);

        let mut buf: Vec<u8> = Vec::new();
        let mut saw_delta = false;

        while let Some(chunk) = bytes.next().await {
            let chunk = chunk?;
            buf.extend_from_slice(&chunk);

            // Only complete lines are decoded; a multi-byte UTF-8 sequence
            // split across reads stays in the buffer until its newline
            // arrives.
            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line);
                let line = line.trim_end_matches(['\n', '\r']);

                let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                    continue;
                };

                if payload.trim() == DONE_SENTINEL {
                    yield StreamEvent::Done;
                    return;
                }

                match serde_json::from_str::<ChatCompletionChunk>(payload) {
                    Ok(chunk) => {
                        if let Some(text) = chunk.delta_content() {
                            if !text.is_empty() {
                                saw_delta = true;
                                yield StreamEvent::Delta(text);
                            }
                        }
                    }
                    Err(err) => {
                        debug!(%err, "skipping malformed event line");
                    }
                }
            }
        }

        if saw_delta {
            Err(ApiError::Truncated)?;
        }
    }
}
