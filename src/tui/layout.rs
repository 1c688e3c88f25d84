//! Layout module - splits the terminal into the widget's regions
//!
//! - Toolbar (1 line): title, upload, theme and sidebar controls
//! - Conversation pane (flexible) with the optional history sidebar
//! - Input (3 lines) with the send button
//! - Status bar (1 line)

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use thiserror::Error;

/// Smallest terminal that fits every region.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

const SIDEBAR_WIDTH: u16 = 32;
const SEND_BUTTON_WIDTH: u16 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Terminal is {width}x{height}, LegalMind needs at least {min_width}x{min_height}")]
    TooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// Layout areas for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLayout {
    pub toolbar_area: Rect,
    pub conversation_area: Rect,
    pub sidebar_area: Option<Rect>,
    pub input_area: Rect,
    pub send_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Fail unless a `width` x `height` terminal can host the widget.
    pub fn check_size(width: u16, height: u16) -> Result<(), LayoutError> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(LayoutError::TooSmall {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        Ok(())
    }

    /// Create the main layout from terminal area
    pub fn new(area: Rect, show_sidebar: bool) -> Result<Self, LayoutError> {
        Self::check_size(area.width, area.height)?;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Toolbar
                Constraint::Min(3),    // Conversation + sidebar
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        // Narrow terminals get a narrower sidebar rather than none
        let (conversation_area, sidebar_area) = if show_sidebar {
            let sidebar_width = SIDEBAR_WIDTH.min(rows[1].width * 2 / 5);
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(sidebar_width)])
                .split(rows[1]);
            (body[0], Some(body[1]))
        } else {
            (rows[1], None)
        };

        let input_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SEND_BUTTON_WIDTH)])
            .split(rows[2]);

        Ok(Self {
            toolbar_area: rows[0],
            conversation_area,
            sidebar_area,
            input_area: input_row[0],
            send_area: input_row[1],
            status_area: rows[3],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_small() {
        assert_eq!(
            AppLayout::new(Rect::new(0, 0, 39, 20), true),
            Err(LayoutError::TooSmall {
                width: 39,
                height: 20,
                min_width: 40,
                min_height: 10,
            })
        );
        assert!(AppLayout::check_size(40, 9).is_err());
        assert!(AppLayout::check_size(40, 10).is_ok());
    }

    #[test]
    fn test_regions_with_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30), true).unwrap();
        assert_eq!(layout.toolbar_area, Rect::new(0, 0, 100, 1));
        assert_eq!(layout.status_area, Rect::new(0, 29, 100, 1));
        assert_eq!(layout.input_area.height, 3);
        assert_eq!(layout.send_area.width, SEND_BUTTON_WIDTH);

        let sidebar = layout.sidebar_area.unwrap();
        assert_eq!(sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.conversation_area.width + sidebar.width, 100);
        assert_eq!(layout.conversation_area.height, 25);
    }

    #[test]
    fn test_hidden_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30), false).unwrap();
        assert!(layout.sidebar_area.is_none());
        assert_eq!(layout.conversation_area.width, 100);
    }

    #[test]
    fn test_narrow_terminal_shrinks_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT), true).unwrap();
        let sidebar = layout.sidebar_area.unwrap();
        assert_eq!(sidebar.width, 16);
        assert_eq!(layout.conversation_area.width, 24);

        let layout = AppLayout::new(Rect::new(0, 0, 60, 20), true).unwrap();
        assert_eq!(layout.sidebar_area.unwrap().width, 24);
    }
}
