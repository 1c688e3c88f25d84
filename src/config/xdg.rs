//! XDG Base Directory support.

use std::path::PathBuf;

const APP_DIR: &str = "legalmind";

/// XDG directory paths for LegalMind.
pub struct XdgDirs {
    /// Config directory (~/.config/legalmind or XDG_CONFIG_HOME/legalmind)
    pub config: PathBuf,
    /// State directory (~/.local/state/legalmind or XDG_STATE_HOME/legalmind)
    pub state: PathBuf,
}

impl XdgDirs {
    /// Get XDG directories, respecting environment variables.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            config: std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".config"))
                .join(APP_DIR),
            state: std::env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".local/state"))
                .join(APP_DIR),
        }
    }

    /// Ensure all directories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.config, &self.state] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Where the TUI writes its log, since stdout belongs to the terminal UI.
    pub fn log_file(&self) -> PathBuf {
        self.state.join("legalmind-tui.log")
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
