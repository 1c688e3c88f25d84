//! Headless chat widget core.
//!
//! [`ChatSession`] owns the message log, both projections of it and the
//! presentation flags. Front ends drive it and draw from its views.

mod controls;
mod error;
mod log;
mod message;
mod render;
mod reply;
mod session;

pub use controls::ThemeMode;
pub use error::ChatError;
pub use log::MessageLog;
pub use message::{seed_messages, Message, Sender, GREETING, OPENING_REQUEST, UPLOAD_PREFIX};
pub use render::{Block, BlockAlign, ConversationView, HistoryLabels, HistoryView};
pub use reply::{
    ReplyError, ReplyId, ReplyReceiver, ReplySimulator, ScheduledReply, REPLY_DELAY, REPLY_TEXT,
};
pub use session::ChatSession;
