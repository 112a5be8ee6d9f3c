//! Append-only conversation history.
//!
//! The conversation is the prompt context: the full ordered history is
//! re-sent on every request, so order is semantically significant and
//! historical entries are never mutated or removed. Each completed (or
//! cancelled) turn adds exactly one user and one assistant message.

use crate::message::{Message, Role};

/// Ordered, append-only sequence of [`Message`]s owned by the session loop.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Start an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a conversation seeded with a system prompt.
    pub fn with_system(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(prompt)],
        }
    }

    /// Append a message. There is no way to remove or edit it afterwards.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Read-only view handed to the transport when building a request.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of completed user/assistant exchanges.
    pub fn turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_in_order() {
        let mut conv = Conversation::with_system("be brief");
        conv.push(Message::user("hi"));
        conv.push(Message::assistant("hello"));

        let roles: Vec<Role> = conv.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(conv.turns(), 1);
        assert_eq!(conv.last().unwrap().content, "hello");
    }
}
