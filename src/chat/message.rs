//! Chat message types.

use serde::{Deserialize, Serialize};

use super::error::ChatError;

/// Opening greeting shown when a session starts.
pub const GREETING: &str = "Hello, how can I assist you today?";
/// Opening user statement shown when a session starts.
pub const OPENING_REQUEST: &str = "I need legal advice.";
/// Prefix recorded for every uploaded file.
pub const UPLOAD_PREFIX: &str = "File uploaded: ";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn is_user(self) -> bool {
        matches!(self, Sender::User)
    }
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    text: String,
    sender: Sender,
}

impl Message {
    /// Create a message, refusing empty text.
    pub fn new(text: impl Into<String>, sender: Sender) -> Result<Self, ChatError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ChatError::EmptyText);
        }
        Ok(Self { text, sender })
    }

    /// Build a user message from raw input.
    ///
    /// Surrounding whitespace is trimmed; input that is empty after
    /// trimming yields `None`.
    pub fn from_input(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            sender: Sender::User,
        })
    }

    /// The user-side record of an uploaded file.
    pub fn upload(file_name: &str) -> Self {
        Self {
            text: format!("{UPLOAD_PREFIX}{file_name}"),
            sender: Sender::User,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// The two messages every session opens with.
pub fn seed_messages() -> [Message; 2] {
    [
        Message {
            text: GREETING.to_string(),
            sender: Sender::Bot,
        },
        Message {
            text: OPENING_REQUEST.to_string(),
            sender: Sender::User,
        },
    ]
}
