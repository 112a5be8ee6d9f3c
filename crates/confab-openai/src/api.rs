//! Wire-format structs for the `chat/completions` endpoint.
//!
//! The request reuses [`confab_core::Message`] directly — the protocol's
//! message *is* `{role, content}` — so no conversion layer is needed.

use confab_core::Message;
use serde::{Deserialize, Serialize};

/// Body of a streaming `POST {base_url}/chat/completions`.
#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<Message>) -> Self {
        Self {
            model,
            messages,
            stream: true,
        }
    }
}

/// A delta message as sent by the server when `stream = true`.
#[derive(Debug, Deserialize, Default)]
pub struct MessageDelta {
    /// Incremental reply text. Absent on role-only and keep-alive chunks.
    #[serde(default)]
    pub content: Option<String>,
}

/// A single streaming choice payload.
#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: MessageDelta,
}

/// The outermost object carried by each SSE `data:` line.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

impl ChatCompletionChunk {
    /// Content of the first choice's delta, if any. Further choices are
    /// never requested and therefore ignored.
    pub fn delta_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
    }
}
