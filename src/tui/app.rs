//! Main TUI application state and logic

use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tui_textarea::{CursorMove, Input, TextArea};

use super::event::{AppEvent, ClipboardManager, EventHandler};
use super::file_picker::{FilePicker, PickerAction};
use super::hit_test::{ClickTarget, HitTestRegistry};
use super::layout::AppLayout;
use super::theme::Theme;
use super::ui;
use super::widgets::ConversationState;
use crate::chat::{ChatSession, ReplyReceiver, ScheduledReply};
use crate::config::ChatConfig;

/// Lines moved per scroll step
const SCROLL_STEP: usize = 3;

/// Everything the widget shows, independent of the terminal
pub struct TuiState {
    /// Conversation, views and presentation flags
    pub session: ChatSession,
    /// Colors for the current theme mode
    pub theme: Theme,
    /// Text input area
    pub input: TextArea<'static>,
    /// Clipboard manager
    pub clipboard: ClipboardManager,
    /// Conversation pane scroll state
    pub conversation_state: ConversationState,
    /// Open file picker, if any
    pub file_picker: Option<FilePicker>,
    /// Directory the file picker opens on
    pub picker_root: PathBuf,
    /// Hit test registry for mouse interaction
    pub hit_registry: HitTestRegistry,
    /// Show help overlay
    pub show_help: bool,
    /// Layout of the last drawn frame
    pub layout: Option<AppLayout>,
    should_quit: bool,
}

impl TuiState {
    pub fn new(session: ChatSession, picker_root: PathBuf, clipboard: ClipboardManager) -> Self {
        let theme = Theme::for_mode(session.theme());
        let input = build_input(&theme);
        Self {
            session,
            theme,
            input,
            clipboard,
            conversation_state: ConversationState::default(),
            file_picker: None,
            picker_root,
            hit_registry: HitTestRegistry::new(),
            show_help: false,
            layout: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Click { row, col } => self.handle_click(col, row),
            AppEvent::ScrollUp { row, col } => {
                if self.in_conversation(col, row) {
                    self.conversation_state.scroll_up(SCROLL_STEP);
                }
            }
            AppEvent::ScrollDown { row, col } => {
                if self.in_conversation(col, row) {
                    self.conversation_state.scroll_down(SCROLL_STEP);
                }
            }
            AppEvent::Paste(text) => {
                if self.file_picker.is_none() {
                    self.input.insert_str(text);
                }
            }
            AppEvent::Resize(..) | AppEvent::Tick => {}
        }
    }

    /// Append a reply that has come due
    pub fn deliver_reply(&mut self, reply: ScheduledReply) {
        self.session.deliver_reply(reply);
        self.conversation_state.follow_latest();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Global shortcuts that bypass textarea
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.should_quit = true;
                return;
            }
            (_, KeyCode::F(1)) => {
                self.show_help = !self.show_help;
                return;
            }
            (_, KeyCode::Esc) if self.show_help => {
                self.show_help = false;
                return;
            }
            _ => {}
        }

        if self.file_picker.is_some() {
            self.handle_picker_key(key);
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('o')) => self.open_file_picker(),
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => self.toggle_theme(),
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => self.toggle_sidebar(),
            (KeyModifiers::CONTROL, KeyCode::Char('v')) => {
                if let Some(text) = self.clipboard.paste() {
                    self.input.insert_str(text);
                }
            }
            (_, KeyCode::PageUp) => self.conversation_state.scroll_up(self.page()),
            (_, KeyCode::PageDown) => self.conversation_state.scroll_down(self.page()),
            (KeyModifiers::NONE, KeyCode::Enter) => self.send_message(),
            (KeyModifiers::SHIFT, KeyCode::Enter) | (KeyModifiers::ALT, KeyCode::Enter) => {
                // Alt+Enter works as fallback when terminal doesn't support
                // keyboard enhancement for detecting Shift+Enter
                self.input.insert_newline();
            }
            _ => {
                self.input.input(Input::from(key));
            }
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(picker) = self.file_picker.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.close_file_picker(None),
            KeyCode::Up => picker.select_prev(),
            KeyCode::Down => picker.select_next(),
            KeyCode::Backspace => {
                picker.activate(0);
            }
            KeyCode::Enter => {
                if let PickerAction::Selected(path) = picker.confirm() {
                    self.close_file_picker(Some(path));
                }
            }
            _ => {}
        }
    }

    pub fn handle_click(&mut self, col: u16, row: u16) {
        let target = self.hit_registry.hit_test(col, row).cloned();

        // Clicking outside the open picker cancels it
        if self.file_picker.is_some() {
            match target {
                Some(ClickTarget::PickerItem(index)) => {
                    let action = self
                        .file_picker
                        .as_mut()
                        .map(|picker| picker.activate(index));
                    if let Some(PickerAction::Selected(path)) = action {
                        self.close_file_picker(Some(path));
                    }
                }
                Some(ClickTarget::Picker) => {}
                _ => self.close_file_picker(None),
            }
            return;
        }

        match target {
            Some(ClickTarget::Send) => self.send_message(),
            Some(ClickTarget::Upload) => self.open_file_picker(),
            Some(ClickTarget::ThemeToggle) => self.toggle_theme(),
            Some(ClickTarget::SidebarToggle) => self.toggle_sidebar(),
            _ => {}
        }
    }

    /// Send the current input as a message
    fn send_message(&mut self) {
        let content = self.input.lines().join("\n");
        if self.session.send_text(&content).is_some() {
            self.input = build_input(&self.theme);
            self.conversation_state.follow_latest();
        }
    }

    pub fn open_file_picker(&mut self) {
        tracing::debug!(root = %self.picker_root.display(), "Opening file picker");
        self.file_picker = Some(FilePicker::open(self.picker_root.clone()));
    }

    /// Close the picker, recording `selection` if a file was chosen
    pub fn close_file_picker(&mut self, selection: Option<PathBuf>) {
        if let Some(picker) = self.file_picker.take() {
            // Reopen where the user left off
            self.picker_root = picker.dir().to_path_buf();
        }
        if self.session.upload_file(selection.as_deref()) {
            self.conversation_state.follow_latest();
        }
    }

    fn toggle_theme(&mut self) {
        self.session.toggle_theme();
        self.theme = Theme::for_mode(self.session.theme());
        style_input(&mut self.input, &self.theme);
    }

    fn toggle_sidebar(&mut self) {
        self.session.toggle_sidebar();
    }

    fn in_conversation(&self, col: u16, row: u16) -> bool {
        self.layout
            .as_ref()
            .map(|layout| layout.conversation_area.contains(Position::new(col, row)))
            .unwrap_or(false)
    }

    fn page(&self) -> usize {
        self.conversation_state.viewport_height.max(1)
    }
}

fn style_input(input: &mut TextArea<'static>, theme: &Theme) {
    input.set_cursor_line_style(Style::default());
    input.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    input.set_placeholder_style(Style::default().fg(theme.text_muted));
    input.set_style(Style::default().fg(theme.text).bg(theme.input_background));
}

fn build_input(theme: &Theme) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text("Type a message...");
    style_input(&mut input, theme);
    input.move_cursor(CursorMove::End);
    input
}

/// Main TUI application
pub struct TuiApp {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Event handler (optional so we can take it out in run loop)
    events: Option<EventHandler>,
    /// Fired simulated replies
    replies: Option<ReplyReceiver>,
    /// Widget state
    pub state: TuiState,
}

impl TuiApp {
    /// Create a new TUI application
    pub fn new(config: &ChatConfig, picker_root: PathBuf) -> Result<Self> {
        // Refuse to start when the regions cannot be laid out
        let (width, height) = crossterm::terminal::size()?;
        AppLayout::check_size(width, height)?;

        let (session, replies) = ChatSession::new(config)?;

        // Initialize terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        enter_screen(&mut stdout)?;

        // Needed to tell Shift+Enter apart from Enter; Alt+Enter is the fallback
        if crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false) {
            let _ = execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            );
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                restore_terminal(&mut io::stdout());
                return Err(err.into());
            }
        };

        // ~60 FPS tick rate
        let events = EventHandler::new(Duration::from_millis(16));

        tracing::info!(width, height, "LegalMind TUI started");

        Ok(Self {
            terminal,
            events: Some(events),
            replies: Some(replies),
            state: TuiState::new(session, picker_root, ClipboardManager::new()),
        })
    }

    /// Run the main event loop
    pub async fn run(&mut self) -> Result<()> {
        // Take channels out of self to avoid borrow conflicts in select! loop
        let mut events = self.events.take().context("Event handler already consumed")?;
        let mut replies = self.replies.take().context("Reply receiver already consumed")?;

        while !self.state.should_quit() {
            let state = &mut self.state;
            self.terminal.draw(|frame| ui::render(frame, state))?;

            tokio::select! {
                Some(reply) = replies.recv() => {
                    self.state.deliver_reply(reply);
                }
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(event) => self.state.handle_event(event),
                        None => break,
                    }
                }
            }
        }

        self.state.session.cancel_pending_replies();
        tracing::info!(
            messages = self.state.session.messages().len(),
            "LegalMind TUI stopped"
        );

        self.events = Some(events);
        self.replies = Some(replies);
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
    }
}

/// Switch `writer` to the alternate screen with mouse and paste reporting.
///
/// Raw mode must already be on. On failure the terminal is restored before
/// the error is returned.
fn enter_screen<W: Write>(writer: &mut W) -> io::Result<()> {
    let entered = execute!(
        writer,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    );
    if entered.is_err() {
        restore_terminal(writer);
    }
    entered
}

/// Undo raw mode and everything `enter_screen` turned on.
fn restore_terminal<W: Write>(writer: &mut W) {
    // Order matters: pop keyboard enhancement flags first (reverse of setup)
    let _ = execute!(writer, PopKeyboardEnhancementFlags);
    let _ = disable_raw_mode();
    let _ = execute!(
        writer,
        DisableBracketedPaste,
        LeaveAlternateScreen,
        DisableMouseCapture
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Sender, REPLY_TEXT};
    use ratatui::backend::TestBackend;

    fn state_in(root: PathBuf) -> (TuiState, ReplyReceiver) {
        let (session, rx) = ChatSession::new(&ChatConfig::default()).unwrap();
        (TuiState::new(session, root, ClipboardManager::disabled()), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(state: &mut TuiState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn draw(state: &mut TuiState) {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| ui::render(frame, state)).unwrap();
    }

    fn click(state: &mut TuiState, target: ClickTarget) {
        let rect = state.hit_registry.bounds_of(&target).unwrap();
        state.handle_event(AppEvent::Click {
            row: rect.y,
            col: rect.x,
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_sends_and_clears_input() {
        let (mut state, mut rx) = state_in(PathBuf::from("."));
        type_text(&mut state, "Hello");
        state.handle_key(key(KeyCode::Enter));

        let last = state.session.messages().last().unwrap();
        assert_eq!(last.text(), "Hello");
        assert_eq!(last.sender(), Sender::User);
        assert!(state.input.is_empty());

        tokio::time::sleep(Duration::from_millis(1001)).await;
        let reply = rx.try_recv().unwrap().unwrap();
        state.deliver_reply(reply);
        assert_eq!(state.session.messages().last().unwrap().text(), REPLY_TEXT);
        assert!(state.conversation_state.is_following());
    }

    #[test]
    fn test_blank_enter_keeps_input() {
        let (mut state, _rx) = state_in(PathBuf::from("."));
        type_text(&mut state, "   ");
        state.handle_key(key(KeyCode::Enter));

        assert_eq!(state.session.messages().len(), 2);
        assert_eq!(state.input.lines(), ["   "]);
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let (mut state, _rx) = state_in(PathBuf::from("."));
        type_text(&mut state, "a");
        state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_text(&mut state, "b");
        assert_eq!(state.input.lines(), ["a", "b"]);
        assert_eq!(state.session.messages().len(), 2);
    }

    #[test]
    fn test_theme_and_sidebar_shortcuts() {
        let (mut state, _rx) = state_in(PathBuf::from("."));
        assert_eq!(state.theme, Theme::light());

        state.handle_key(ctrl('t'));
        assert_eq!(state.session.theme_label(), "Light Mode");
        assert_eq!(state.theme, Theme::dark());

        state.handle_key(ctrl('b'));
        assert!(!state.session.sidebar_visible());
        state.handle_key(ctrl('b'));
        assert!(state.session.sidebar_visible());

        state.handle_key(ctrl('t'));
        assert_eq!(state.session.theme_label(), "Dark Mode");
        assert_eq!(state.session.messages().len(), 2);
    }

    #[test]
    fn test_upload_through_picker() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("contract.pdf"), b"%PDF").unwrap();
        let (mut state, _rx) = state_in(tmp.path().to_path_buf());

        state.handle_key(ctrl('o'));
        assert!(state.file_picker.is_some());

        // Typing goes to the picker, not the input
        state.handle_key(key(KeyCode::Char('x')));
        assert!(state.input.is_empty());

        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Enter));

        assert!(state.file_picker.is_none());
        let last = state.session.messages().last().unwrap();
        assert_eq!(last.text(), "File uploaded: contract.pdf");
        assert_eq!(state.session.pending_replies(), 0);
    }

    #[test]
    fn test_escape_cancels_picker() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut state, _rx) = state_in(tmp.path().to_path_buf());
        let renders = state.session.history().render_count();

        state.handle_key(ctrl('o'));
        state.handle_key(key(KeyCode::Esc));

        assert!(state.file_picker.is_none());
        assert_eq!(state.session.messages().len(), 2);
        assert_eq!(state.session.history().render_count(), renders);
    }

    #[test]
    fn test_toolbar_clicks() {
        let (mut state, _rx) = state_in(PathBuf::from("."));
        draw(&mut state);

        click(&mut state, ClickTarget::ThemeToggle);
        assert_eq!(state.session.theme_label(), "Light Mode");

        draw(&mut state);
        click(&mut state, ClickTarget::SidebarToggle);
        assert!(!state.session.sidebar_visible());

        draw(&mut state);
        click(&mut state, ClickTarget::SidebarToggle);
        assert!(state.session.sidebar_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_button_click() {
        let (mut state, _rx) = state_in(PathBuf::from("."));
        type_text(&mut state, "via button");
        draw(&mut state);
        click(&mut state, ClickTarget::Send);
        assert_eq!(state.session.messages().last().unwrap().text(), "via button");
    }

    #[test]
    fn test_click_outside_picker_cancels() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("notes.txt"), b"").unwrap();
        let (mut state, _rx) = state_in(tmp.path().to_path_buf());

        draw(&mut state);
        click(&mut state, ClickTarget::Upload);
        assert!(state.file_picker.is_some());

        draw(&mut state);
        state.handle_event(AppEvent::Click { row: 0, col: 0 });
        assert!(state.file_picker.is_none());
        assert_eq!(state.session.messages().len(), 2);
    }

    #[test]
    fn test_click_picker_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("notes.txt"), b"").unwrap();
        let (mut state, _rx) = state_in(tmp.path().to_path_buf());

        state.open_file_picker();
        draw(&mut state);
        click(&mut state, ClickTarget::PickerItem(1));

        assert!(state.file_picker.is_none());
        assert_eq!(
            state.session.messages().last().unwrap().text(),
            "File uploaded: notes.txt"
        );
    }

    #[test]
    fn test_quit_and_help() {
        let (mut state, _rx) = state_in(PathBuf::from("."));
        state.handle_key(key(KeyCode::F(1)));
        assert!(state.show_help);
        state.handle_key(key(KeyCode::Esc));
        assert!(!state.show_help);

        assert!(!state.should_quit());
        state.handle_key(ctrl('q'));
        assert!(state.should_quit());
    }

    /// Records output; the first flush fails like a closed terminal would
    struct FailingTerminal {
        written: Vec<u8>,
        fail_flush: bool,
    }

    impl Write for FailingTerminal {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if std::mem::take(&mut self.fail_flush) {
                return Err(io::Error::other("terminal gone"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut out = FailingTerminal {
            written: Vec::new(),
            fail_flush: true,
        };
        assert!(enter_screen(&mut out).is_err());

        let written = String::from_utf8_lossy(&out.written);
        let entered = written.find("\x1b[?1049h").unwrap();
        let left = written.rfind("\x1b[?1049l").unwrap();
        assert!(left > entered);
        assert!(written.contains("\x1b[?2004l"));
    }

    #[test]
    fn test_paste_event_fills_input() {
        let (mut state, _rx) = state_in(PathBuf::from("."));
        state.handle_event(AppEvent::Paste("pasted text".to_string()));
        assert_eq!(state.input.lines(), ["pasted text"]);
    }
}
