//! Status bar widget
//!
//! Displays keybind hints and the number of outstanding replies.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::theme::Theme;

const HINTS: [(&str, &str); 6] = [
    ("Enter", "send"),
    ("Ctrl+O", "upload"),
    ("Ctrl+T", "theme"),
    ("Ctrl+B", "history"),
    ("F1", "help"),
    ("Ctrl+Q", "quit"),
];

/// Status bar widget
pub struct StatusBar<'a> {
    theme: &'a Theme,
    pending_replies: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme, pending_replies: usize) -> Self {
        Self {
            theme,
            pending_replies,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.panel_background));

        let separator_style = Style::default().fg(self.theme.border);
        let hint_style = Style::default().fg(self.theme.text_muted);

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in HINTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", separator_style));
            }
            spans.push(Span::styled(format!("{}: {}", key, action), hint_style));
        }

        if self.pending_replies > 0 {
            let right = format!("{} pending ", self.pending_replies);
            let left_width: usize = spans.iter().map(|s| s.width()).sum();
            let padding = (area.width as usize).saturating_sub(left_width + right.len());
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(right, Style::default().fg(self.theme.accent)));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
