//! File picker modal widget with mouse support

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::tui::file_picker::FilePicker;
use crate::tui::hit_test::{ClickTarget, HitTestRegistry};
use crate::tui::theme::Theme;

pub struct FilePickerWidget<'a> {
    picker: &'a FilePicker,
    theme: &'a Theme,
}

impl<'a> FilePickerWidget<'a> {
    pub fn new(picker: &'a FilePicker, theme: &'a Theme) -> Self {
        Self { picker, theme }
    }

    /// Rows available for entries inside `area`
    pub fn visible_rows(area: Rect) -> usize {
        area.height.saturating_sub(2) as usize
    }

    pub fn render(self, area: Rect, buf: &mut Buffer, registry: &mut HitTestRegistry) {
        Clear.render(area, buf);
        registry.register(area, ClickTarget::Picker);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(format!(" Upload: {} ", self.picker.dir().display()))
            .style(
                Style::default()
                    .fg(self.theme.text)
                    .bg(self.theme.panel_background),
            );
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = (self.picker.scroll()..self.picker.item_count()).take(inner.height as usize);
        for (line, index) in rows.enumerate() {
            let Some(label) = self.picker.label(index) else {
                continue;
            };
            let row = Rect::new(inner.x, inner.y + line as u16, inner.width, 1);
            let is_selected = index == self.picker.selected();

            let (prefix, style) = if is_selected {
                (
                    "▶ ",
                    Style::default()
                        .fg(self.theme.panel_background)
                        .bg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(self.theme.text))
            };

            buf.set_style(row, style);
            buf.set_stringn(
                row.x,
                row.y,
                format!("{}{}", prefix, label),
                row.width as usize,
                style,
            );
            registry.register(row, ClickTarget::PickerItem(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_clickable() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("contract.pdf"), b"").unwrap();
        let picker = FilePicker::open(tmp.path());
        let theme = Theme::light();
        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buffer::empty(area);
        let mut registry = HitTestRegistry::new();

        FilePickerWidget::new(&picker, &theme).render(area, &mut buf, &mut registry);

        assert_eq!(registry.hit_test(5, 1), Some(&ClickTarget::PickerItem(0)));
        assert_eq!(registry.hit_test(5, 2), Some(&ClickTarget::PickerItem(1)));
        assert_eq!(registry.hit_test(5, 3), Some(&ClickTarget::Picker));
        assert_eq!(FilePickerWidget::visible_rows(area), 4);

        let row: String = (0..50).map(|x| buf[(x, 2)].symbol()).collect();
        assert!(row.contains("contract.pdf"));
    }
}
