mod conversation;
mod history;
mod picker;
mod status;
mod toolbar;

pub use conversation::{sanitize, ConversationPane, ConversationState};
pub use history::HistoryPanel;
pub use picker::FilePickerWidget;
pub use status::StatusBar;
pub use toolbar::Toolbar;
