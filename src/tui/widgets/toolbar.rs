//! Toolbar with the upload, theme and sidebar controls

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::hit_test::{ClickTarget, HitTestRegistry};
use crate::tui::theme::Theme;

const TITLE: &str = " ⚖ LegalMind ";

pub struct Toolbar<'a> {
    theme: &'a Theme,
    theme_label: &'a str,
    sidebar_visible: bool,
}

impl<'a> Toolbar<'a> {
    pub fn new(theme: &'a Theme, theme_label: &'a str, sidebar_visible: bool) -> Self {
        Self {
            theme,
            theme_label,
            sidebar_visible,
        }
    }

    /// Buttons from left to right, with short labels when `compact`
    fn buttons(&self, compact: bool) -> [(String, ClickTarget); 3] {
        let sidebar = match (compact, self.sidebar_visible) {
            (false, true) => "Hide History",
            (false, false) => "Show History",
            (true, true) => "Hide",
            (true, false) => "Show",
        };
        let theme = if compact {
            // "Dark Mode" -> "Dark"
            self.theme_label
                .split_whitespace()
                .next()
                .unwrap_or(self.theme_label)
        } else {
            self.theme_label
        };
        let pad = if compact { "" } else { " " };
        [
            (format!("[{pad}Upload{pad}]"), ClickTarget::Upload),
            (format!("[{pad}{theme}{pad}]"), ClickTarget::ThemeToggle),
            (format!("[{pad}{sidebar}{pad}]"), ClickTarget::SidebarToggle),
        ]
    }

    fn buttons_width(buttons: &[(String, ClickTarget)]) -> usize {
        buttons.iter().map(|(label, _)| label.width() + 1).sum()
    }

    pub fn render(self, area: Rect, buf: &mut Buffer, registry: &mut HitTestRegistry) {
        buf.set_style(
            area,
            Style::default()
                .fg(self.theme.text)
                .bg(self.theme.panel_background),
        );

        let title = Span::styled(
            TITLE,
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        );
        buf.set_span(area.x, area.y, &title, area.width);

        // Buttons are right-aligned and never cover the title
        let mut buttons = self.buttons(false);
        if TITLE.width() + Self::buttons_width(&buttons) > area.width as usize {
            buttons = self.buttons(true);
        }
        let total = Self::buttons_width(&buttons);
        let mut x = area.x + (area.width as usize).saturating_sub(total) as u16;
        let button_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);

        for (label, target) in buttons {
            let width = label.width() as u16;
            if x + width > area.x + area.width {
                break;
            }
            buf.set_string(x, area.y, &label, button_style);
            registry.register(Rect::new(x, area.y, width, 1), target);
            x += width + 1;
        }
    }
}
