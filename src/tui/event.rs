//! Event handling for keyboard, mouse, and terminal events

use std::time::Duration;

use arboard::Clipboard;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEventKind};
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Left mouse button released at a cell
    Click { row: u16, col: u16 },
    /// Mouse wheel up
    ScrollUp { row: u16, col: u16 },
    /// Mouse wheel down
    ScrollDown { row: u16, col: u16 },
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for redraws
    Tick,
    /// Bracketed paste
    Paste(String),
}

impl AppEvent {
    /// Map a raw crossterm event; `None` for events the widget ignores.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(AppEvent::Key(key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Up(MouseButton::Left) => Some(AppEvent::Click {
                    row: mouse.row,
                    col: mouse.column,
                }),
                MouseEventKind::ScrollUp => Some(AppEvent::ScrollUp {
                    row: mouse.row,
                    col: mouse.column,
                }),
                MouseEventKind::ScrollDown => Some(AppEvent::ScrollDown {
                    row: mouse.row,
                    col: mouse.column,
                }),
                _ => None,
            },
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            Event::Paste(text) => Some(AppEvent::Paste(text)),
            _ => None,
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // Terminal polling blocks, so it gets its own thread
        std::thread::spawn(move || loop {
            let next = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(raw) => AppEvent::from_crossterm(raw),
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        None
                    }
                }
            } else {
                Some(AppEvent::Tick)
            };

            if let Some(app_event) = next {
                if tx.send(app_event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Clipboard manager for paste operations
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::debug!("Clipboard unavailable: {}", e);
                None
            }
        };
        Self { clipboard }
    }

    /// A manager with no system clipboard behind it.
    pub fn disabled() -> Self {
        Self { clipboard: None }
    }

    /// Paste text from clipboard
    pub fn paste(&mut self) -> Option<String> {
        self.clipboard.as_mut()?.get_text().ok()
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
