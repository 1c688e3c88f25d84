//! A single chat widget instance.

use std::path::Path;

use super::controls::ThemeMode;
use super::error::ChatError;
use super::log::MessageLog;
use super::message::Message;
use super::render::{ConversationView, HistoryView};
use super::reply::{ReplyId, ReplyReceiver, ReplySimulator, ScheduledReply};
use crate::config::ChatConfig;

/// Conversation state plus the presentation flags of one widget.
///
/// Every append re-renders both views from the whole log, so the
/// conversation pane and the history list always hold the same messages in
/// the same order.
pub struct ChatSession {
    log: MessageLog,
    conversation: ConversationView,
    history: HistoryView,
    theme: ThemeMode,
    sidebar_visible: bool,
    replies: ReplySimulator,
}

impl ChatSession {
    /// Start a session with the seed messages already rendered.
    ///
    /// Fired replies arrive on the returned receiver and must be handed back
    /// through [`ChatSession::deliver_reply`].
    pub fn new(config: &ChatConfig) -> Result<(Self, ReplyReceiver), ChatError> {
        let (replies, receiver) =
            ReplySimulator::new(config.reply_delay(), config.reply_text.clone())?;

        let mut session = Self {
            log: MessageLog::seeded(),
            conversation: ConversationView::new(),
            history: HistoryView::new(config.labels()),
            theme: if config.start_dark {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            },
            sidebar_visible: config.show_sidebar,
            replies,
        };
        session.render();
        Ok((session, receiver))
    }

    /// Send user text.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the trimmed text
    /// is appended and one reply is scheduled. Needs a tokio runtime.
    pub fn send_text(&mut self, input: &str) -> Option<ReplyId> {
        let Some(message) = Message::from_input(input) else {
            tracing::trace!("Ignoring blank input");
            return None;
        };
        self.append(message);
        Some(self.replies.schedule())
    }

    /// Record the file picked in the file picker.
    ///
    /// `None` means the picker was cancelled. Only the file name is used;
    /// the file is never read. No reply is scheduled for uploads.
    pub fn upload_file(&mut self, selection: Option<&Path>) -> bool {
        let Some(path) = selection else {
            tracing::debug!("File selection cancelled");
            return false;
        };
        match file_name_of(path) {
            Ok(name) => {
                self.append(Message::upload(&name));
                true
            }
            Err(e) => {
                tracing::debug!("Ignoring upload: {}", e);
                false
            }
        }
    }

    /// Append a reply that has come due.
    pub fn deliver_reply(&mut self, reply: ScheduledReply) {
        tracing::debug!(reply_id = reply.id.get(), "Delivering simulated reply");
        self.append(reply.message);
    }

    /// Flip light/dark and return the control's new label.
    pub fn toggle_theme(&mut self) -> &'static str {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = ?self.theme, "Theme toggled");
        self.theme.toggle_label()
    }

    /// Flip sidebar visibility and return the new state.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_visible = !self.sidebar_visible;
        tracing::debug!(visible = self.sidebar_visible, "Sidebar toggled");
        self.sidebar_visible
    }

    /// Cancel replies that have not fired yet.
    pub fn cancel_pending_replies(&self) {
        self.replies.cancel_pending();
    }

    pub fn messages(&self) -> &[Message] {
        self.log.all()
    }

    pub fn conversation(&self) -> &ConversationView {
        &self.conversation
    }

    pub fn history(&self) -> &HistoryView {
        &self.history
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn theme_label(&self) -> &'static str {
        self.theme.toggle_label()
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.pending()
    }

    fn append(&mut self, message: Message) {
        tracing::debug!(sender = ?message.sender(), len = self.log.len() + 1, "Appending message");
        self.log.append(message);
        self.render();
    }

    fn render(&mut self) {
        self.conversation.render(self.log.all());
        self.history.render(self.log.all());
    }
}

fn file_name_of(path: &Path) -> Result<String, ChatError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ChatError::NoFileName(path.to_path_buf()))
}
