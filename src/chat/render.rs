//! Projections of the message log into the two chat views.
//!
//! Both views rebuild from the whole log on every call. Nothing is diffed,
//! so the order of the projection always matches the log.

use super::message::{Message, Sender};

/// Horizontal placement of a conversation block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAlign {
    Left,
    Right,
}

impl From<Sender> for BlockAlign {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => BlockAlign::Right,
            Sender::Bot => BlockAlign::Left,
        }
    }
}

/// One rendered message in the conversation pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub sender: Sender,
    pub align: BlockAlign,
}

/// Primary chat display
#[derive(Debug, Clone, Default)]
pub struct ConversationView {
    blocks: Vec<Block>,
    scroll_target: Option<usize>,
    renders: usize,
}

impl ConversationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the view and rebuild it from `messages`.
    ///
    /// Afterwards the scroll target points at the most recent block.
    pub fn render(&mut self, messages: &[Message]) {
        self.blocks.clear();
        self.blocks.extend(messages.iter().map(|msg| Block {
            text: msg.text().to_string(),
            sender: msg.sender(),
            align: msg.sender().into(),
        }));
        self.scroll_target = self.blocks.len().checked_sub(1);
        self.renders += 1;
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Index of the block the pane should keep in view.
    pub fn scroll_target(&self) -> Option<usize> {
        self.scroll_target
    }

    /// How many times the view has been rebuilt.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Display names used by the history list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLabels {
    pub user: String,
    pub bot: String,
}

impl Default for HistoryLabels {
    fn default() -> Self {
        Self {
            user: "You".to_string(),
            bot: "LegalMind".to_string(),
        }
    }
}

impl HistoryLabels {
    pub fn for_sender(&self, sender: Sender) -> &str {
        match sender {
            Sender::User => &self.user,
            Sender::Bot => &self.bot,
        }
    }

    /// `"<Label>: <text>"` for a single message.
    pub fn entry(&self, message: &Message) -> String {
        format!("{}: {}", self.for_sender(message.sender()), message.text())
    }
}

/// Compact textual list shown in the sidebar
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    labels: HistoryLabels,
    entries: Vec<String>,
    renders: usize,
}

impl HistoryView {
    pub fn new(labels: HistoryLabels) -> Self {
        Self {
            labels,
            entries: Vec::new(),
            renders: 0,
        }
    }

    /// Clear the list and rebuild it from `messages`.
    pub fn render(&mut self, messages: &[Message]) {
        let labels = &self.labels;
        self.entries.clear();
        self.entries.extend(messages.iter().map(|msg| labels.entry(msg)));
        self.renders += 1;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn labels(&self) -> &HistoryLabels {
        &self.labels
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
