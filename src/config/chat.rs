//! Chat widget settings.
//!
//! Settings come from an optional JSON file; any field left out keeps its
//! default. Command-line overrides are applied on top by the runner.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::XdgDirs;
use crate::chat::{HistoryLabels, REPLY_DELAY, REPLY_TEXT};

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// Runtime settings for one chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Delay before the simulated reply, in milliseconds
    pub reply_delay_ms: u64,
    /// Text of the simulated reply
    pub reply_text: String,
    /// History label for user messages
    pub user_label: String,
    /// History label for bot messages
    pub bot_label: String,
    /// Start in dark mode
    pub start_dark: bool,
    /// Start with the history sidebar visible
    pub show_sidebar: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let labels = HistoryLabels::default();
        Self {
            reply_delay_ms: REPLY_DELAY.as_millis() as u64,
            reply_text: REPLY_TEXT.to_string(),
            user_label: labels.user,
            bot_label: labels.bot,
            start_dark: false,
            show_sidebar: true,
        }
    }
}

impl ChatConfig {
    /// Load settings from `explicit`, or from the default config file.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(explicit: Option<&Path>, dirs: &XdgDirs) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (dirs.config.join(CONFIG_FILE_NAME), false),
        };

        if !required && !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.validate()?;

        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Check values the widget cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_text.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "reply_text must not be empty".to_string(),
            ));
        }
        if self.user_label.is_empty() || self.bot_label.is_empty() {
            return Err(ConfigError::InvalidValue(
                "history labels must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn labels(&self) -> HistoryLabels {
        HistoryLabels {
            user: self.user_label.clone(),
            bot: self.bot_label.clone(),
        }
    }
}
