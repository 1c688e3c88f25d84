//! Terminal front end for the LegalMind chat widget
//!
//! Lays the widget out as toolbar, conversation pane, history sidebar,
//! input with send button and status bar, with mouse support.

mod app;
mod event;
mod theme;
mod ui;

pub mod file_picker;
pub mod layout;
pub mod widgets;

pub use app::{TuiApp, TuiState};
pub use event::{AppEvent, ClipboardManager};
pub use theme::Theme;

use std::path::PathBuf;

use anyhow::Result;

use crate::config::ChatConfig;

/// Run the TUI application
pub async fn run(config: ChatConfig, picker_root: PathBuf) -> Result<()> {
    let mut app = TuiApp::new(&config, picker_root)?;
    app.run().await
}
