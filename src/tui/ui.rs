//! Main UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::TuiState;
use super::layout::{AppLayout, LayoutError};
use super::theme::Theme;
use crate::tui::hit_test::ClickTarget;
use crate::tui::widgets::{
    ConversationPane, FilePickerWidget, HistoryPanel, StatusBar, Toolbar,
};

/// Render the entire UI
pub fn render(frame: &mut Frame, state: &mut TuiState) {
    state.hit_registry.clear();

    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().fg(state.theme.text).bg(state.theme.background)),
        area,
    );

    let layout = match AppLayout::new(area, state.session.sidebar_visible()) {
        Ok(layout) => layout,
        Err(err) => {
            render_too_small(frame, &state.theme, &err, area);
            state.layout = None;
            return;
        }
    };

    Toolbar::new(
        &state.theme,
        state.session.theme_label(),
        state.session.sidebar_visible(),
    )
    .render(layout.toolbar_area, frame.buffer_mut(), &mut state.hit_registry);

    let pane = ConversationPane::new(state.session.conversation(), &state.theme)
        .pending_replies(state.session.pending_replies());
    frame.render_stateful_widget(pane, layout.conversation_area, &mut state.conversation_state);

    if let Some(sidebar) = layout.sidebar_area {
        frame.render_widget(
            HistoryPanel::new(state.session.history(), &state.theme),
            sidebar,
        );
    }

    render_input(frame, state, layout.input_area);
    render_send_button(frame, state, layout.send_area);

    frame.render_widget(
        StatusBar::new(&state.theme, state.session.pending_replies()),
        layout.status_area,
    );

    // Modals on top
    if state.file_picker.is_some() {
        let picker_area = centered_rect(60, 60, area);
        let rows = FilePickerWidget::visible_rows(picker_area);
        if let Some(picker) = state.file_picker.as_mut() {
            picker.ensure_visible(rows);
        }
        if let Some(picker) = state.file_picker.as_ref() {
            FilePickerWidget::new(picker, &state.theme).render(
                picker_area,
                frame.buffer_mut(),
                &mut state.hit_registry,
            );
        }
    }

    if state.show_help {
        render_help(frame, &state.theme, area);
    }

    state.layout = Some(layout);
}

fn render_input(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(state.theme.border))
        .title(" Message ");
    state.input.set_block(block);
    frame.render_widget(&state.input, area);
}

fn render_send_button(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let button = Paragraph::new(Line::from(Span::styled(
        "Send",
        Style::default()
            .fg(state.theme.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(state.theme.accent)),
    );
    frame.render_widget(button, area);
    state.hit_registry.register(area, ClickTarget::Send);
}

fn render_too_small(frame: &mut Frame, theme: &Theme, err: &LayoutError, area: Rect) {
    let notice = Paragraph::new(vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(theme.text_muted),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(notice, area);
}

fn render_help(frame: &mut Frame, theme: &Theme, area: Rect) {
    let key_style = Style::default().fg(theme.accent);
    let shortcuts = [
        (" Enter       ", "Send message"),
        (" Shift+Enter ", "New line (Alt+Enter also works)"),
        (" Ctrl+O      ", "Upload a file"),
        (" Ctrl+T      ", "Toggle dark/light mode"),
        (" Ctrl+B      ", "Show/hide history"),
        (" Ctrl+V      ", "Paste"),
        (" PgUp/PgDn   ", "Scroll conversation"),
        (" Mouse       ", "Click buttons, wheel to scroll"),
        (" Esc         ", "Close picker/help"),
        (" F1          ", "Show this help"),
        (" Ctrl+Q      ", "Quit"),
    ];

    let mut help_lines = vec![
        Line::from(vec![Span::styled(
            " Keyboard Shortcuts ",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    help_lines.extend(
        shortcuts
            .iter()
            .map(|(key, action)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)])),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Help ")
        .style(Style::default().fg(theme.text).bg(theme.panel_background));

    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .alignment(Alignment::Left);

    let area = centered_rect(60, 60, area);
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
