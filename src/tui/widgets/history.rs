//! History sidebar: `"<Label>: <text>"` per message

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

use super::conversation::sanitize;
use crate::chat::HistoryView;
use crate::tui::theme::Theme;

pub struct HistoryPanel<'a> {
    view: &'a HistoryView,
    theme: &'a Theme,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(view: &'a HistoryView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

impl Widget for HistoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(self.theme.border))
            .title(" History ")
            .style(
                Style::default()
                    .fg(self.theme.text)
                    .bg(self.theme.panel_background),
            );
        let width = block.inner(area).width.max(1) as usize;

        let items: Vec<ListItem> = self
            .view
            .entries()
            .iter()
            .map(|entry| {
                let text = sanitize(entry);
                let lines: Vec<Line> = textwrap::wrap(&text, width)
                    .into_iter()
                    .map(|l| Line::from(l.into_owned()))
                    .collect();
                ListItem::new(Text::from(lines))
            })
            .collect();

        // Selecting the newest entry makes the list scroll to it
        let mut state = ListState::default().with_selected(self.view.len().checked_sub(1));
        let list = List::new(items).block(block);
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
