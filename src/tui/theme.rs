//! TUI color themes for light and dark mode

use ratatui::style::Color;

use crate::chat::ThemeMode;

/// TUI color theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub panel_background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub accent: Color,
    pub user_bubble: Color,
    pub user_text: Color,
    pub bot_bubble: Color,
    pub bot_text: Color,
    pub input_background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Light theme with ChatGPT-style bubbles
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 250),
            panel_background: Color::Rgb(240, 240, 240),
            text: Color::Rgb(33, 33, 33),
            text_muted: Color::Rgb(117, 117, 117),
            border: Color::Rgb(189, 189, 189),
            accent: Color::Rgb(0, 121, 107),
            user_bubble: Color::Rgb(0, 121, 107),
            user_text: Color::White,
            bot_bubble: Color::Rgb(224, 224, 224),
            bot_text: Color::Rgb(33, 33, 33),
            input_background: Color::Rgb(255, 255, 255),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(30, 30, 30),
            panel_background: Color::Rgb(37, 37, 38),
            text: Color::Rgb(212, 212, 212),
            text_muted: Color::Rgb(128, 128, 128),
            border: Color::Rgb(60, 60, 60),
            accent: Color::Rgb(77, 182, 172),
            user_bubble: Color::Rgb(0, 105, 92),
            user_text: Color::White,
            bot_bubble: Color::Rgb(55, 55, 58),
            bot_text: Color::Rgb(212, 212, 212),
            input_background: Color::Rgb(45, 45, 48),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert_eq!(Theme::for_mode(ThemeMode::Light), Theme::light());
        assert_eq!(Theme::for_mode(ThemeMode::Dark), Theme::dark());
        assert_ne!(Theme::light().background, Theme::dark().background);
    }
}
