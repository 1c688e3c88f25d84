//! Presentation flags flipped by the toolbar controls.

/// Light or dark presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label of the theme control: the action it will perform next.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Dark Mode",
            ThemeMode::Dark => "Light Mode",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_names_next_action() {
        assert_eq!(ThemeMode::Light.toggle_label(), "Dark Mode");
        assert_eq!(ThemeMode::Dark.toggle_label(), "Light Mode");
    }

    #[test]
    fn test_toggle_round_trip() {
        let mode = ThemeMode::default();
        assert_eq!(mode, ThemeMode::Light);
        assert!(mode.toggled().is_dark());
        assert_eq!(mode.toggled().toggled(), mode);
    }
}
