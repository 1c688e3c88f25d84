//! Append-only conversation log.

use super::message::{seed_messages, Message};

/// Ordered record of every conversation turn.
///
/// The log never reorders, edits or removes entries. It does not notify
/// anyone about appends; the owner re-renders its views afterwards.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log holding the opening greeting and request.
    pub fn seeded() -> Self {
        Self {
            messages: seed_messages().into(),
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Every message in append order.
    pub fn all(&self) -> &[Message] {
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
}
