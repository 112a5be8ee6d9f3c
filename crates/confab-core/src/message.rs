//! Chat message and role types shared by every part of the client.
//!
//! They deliberately mirror the wire shape used by OpenAI-compatible chat
//! APIs: a message is a `role` plus a `content` string, nothing more. By
//! staying minimal we can:
//!
//! * serialize them straight into the request body without conversion
//!   structs,
//! * use them in unit tests without mocking a full transport layer, and
//! * keep the conversation history provider-agnostic.
//!
//! ## When to add more fields?
//!
//! Only if the data is **part of the wire contract** this client speaks.
//! Anything provider-specific belongs in the backend crate instead.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single chat message, immutable once appended to a conversation.
///
/// ```rust
/// use confab_core::{Message, Role};
///
/// let msg = Message::user("Hello there!");
/// assert_eq!(msg.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Shorthand for a [`Role::System`] message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Shorthand for a [`Role::User`] message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Shorthand for a [`Role::Assistant`] message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// The author of a [`Message`].
///
/// The `Display` implementation renders the canonical lowercase name so the
/// value can be fed directly into JSON or log lines without extra mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that define global behaviour, sent first if present.
    System,
    /// Messages originating from the human user.
    User,
    /// Messages produced by the model.
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let msg = Message::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn role_round_trips() {
        let json = r#"{"role":"assistant","content":"hello"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg, Message::assistant("hello"));
    }
}
