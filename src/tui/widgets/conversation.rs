//! Conversation pane: one bubble per message
//!
//! User bubbles sit on the right, bot bubbles on the left. Bubbles are at
//! most 60% of the pane wide and word-wrapped inside that width.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::StatefulWidget,
};
use unicode_width::UnicodeWidthStr;

use crate::chat::{BlockAlign, ConversationView, Sender};
use crate::tui::theme::Theme;

const MIN_BUBBLE_WIDTH: usize = 12;

/// Scroll state for the conversation pane
#[derive(Debug)]
pub struct ConversationState {
    /// Current scroll offset (in lines)
    pub offset: usize,
    /// Total content height (in lines)
    pub content_height: usize,
    /// Viewport height
    pub viewport_height: usize,
    /// Keep the most recent message in view
    follow: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            offset: 0,
            content_height: 0,
            viewport_height: 0,
            follow: true,
        }
    }
}

impl ConversationState {
    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
        self.follow = self.offset >= self.max_offset();
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.offset = (self.offset + amount).min(self.max_offset());
        self.follow = self.offset >= self.max_offset();
    }

    /// Jump to the most recent message and stay there as messages arrive
    pub fn follow_latest(&mut self) {
        self.follow = true;
        self.offset = self.max_offset();
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }
}

/// Replace anything that would reach the terminal as a control sequence.
///
/// Message text is shown literally: ANSI escapes are removed and other
/// control characters except newlines become spaces.
pub fn sanitize(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
        .chars()
        .map(|c| if c.is_control() && c != '\n' { ' ' } else { c })
        .collect()
}

struct Row {
    x: u16,
    line: Line<'static>,
}

/// Widget drawing a [`ConversationView`]
pub struct ConversationPane<'a> {
    view: &'a ConversationView,
    theme: &'a Theme,
    pending_replies: usize,
}

impl<'a> ConversationPane<'a> {
    pub fn new(view: &'a ConversationView, theme: &'a Theme) -> Self {
        Self {
            view,
            theme,
            pending_replies: 0,
        }
    }

    /// Show a typing indicator while replies are outstanding
    pub fn pending_replies(mut self, pending: usize) -> Self {
        self.pending_replies = pending;
        self
    }

    fn bubble_style(&self, sender: Sender) -> Style {
        match sender {
            Sender::User => Style::default()
                .fg(self.theme.user_text)
                .bg(self.theme.user_bubble),
            Sender::Bot => Style::default()
                .fg(self.theme.bot_text)
                .bg(self.theme.bot_bubble),
        }
    }

    /// Lay every block out as rows; `None` rows are spacers
    fn layout(&self, width: u16) -> Vec<Option<Row>> {
        let pane_width = width as usize;
        let max_bubble = (pane_width * 3 / 5).max(MIN_BUBBLE_WIDTH).min(pane_width);
        let text_width = max_bubble.saturating_sub(2).max(1);

        let mut rows = Vec::new();
        for (i, block) in self.view.blocks().iter().enumerate() {
            if i > 0 {
                rows.push(None);
            }

            let text = sanitize(&block.text);
            let lines: Vec<String> = textwrap::wrap(&text, text_width)
                .into_iter()
                .map(|l| l.into_owned())
                .collect();
            let inner = lines.iter().map(|l| l.width()).max().unwrap_or(0);
            let bubble_width = (inner + 2).min(pane_width);
            let x = match block.align {
                BlockAlign::Left => 0,
                BlockAlign::Right => (pane_width - bubble_width) as u16,
            };
            let style = self.bubble_style(block.sender);

            for line in lines {
                let pad = inner.saturating_sub(line.width());
                let content = format!(" {}{} ", line, " ".repeat(pad));
                rows.push(Some(Row {
                    x,
                    line: Line::from(Span::styled(content, style)),
                }));
            }
        }

        if self.pending_replies > 0 {
            rows.push(None);
            rows.push(Some(Row {
                x: 0,
                line: Line::from(Span::styled(
                    "● LegalMind is typing...",
                    Style::default()
                        .fg(self.theme.text_muted)
                        .add_modifier(Modifier::ITALIC),
                )),
            }));
        }

        rows
    }
}

impl StatefulWidget for ConversationPane<'_> {
    type State = ConversationState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(area, Style::default().bg(self.theme.background));

        let rows = self.layout(area.width);
        state.content_height = rows.len();
        state.viewport_height = area.height as usize;

        if state.follow && self.view.scroll_target().is_some() {
            state.offset = state.max_offset();
        } else {
            state.offset = state.offset.min(state.max_offset());
        }

        let visible = rows
            .iter()
            .skip(state.offset)
            .take(area.height as usize)
            .enumerate();
        for (i, row) in visible {
            if let Some(row) = row {
                let x = area.x + row.x;
                let width = area.width.saturating_sub(row.x);
                buf.set_line(x, area.y + i as u16, &row.line, width);
            }
        }
    }
}
