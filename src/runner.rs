//! Application Runner Module
//!
//! Shared entry point for the `legalmind` binary: logging, configuration
//! and the async runtime the terminal UI runs on.

use std::path::PathBuf;

use crate::config::{ChatConfig, XdgDirs};

/// Runtime options collected from the command line and environment.
///
/// Values left as `None` fall back to the config file, then to defaults.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
    /// Start in dark mode
    pub dark: bool,
    /// Start with the history sidebar hidden
    pub hide_sidebar: bool,
    /// Override the simulated reply delay
    pub reply_delay_ms: Option<u64>,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
}

impl AppConfig {
    /// Lay command line overrides over a loaded config.
    pub fn apply(&self, mut chat: ChatConfig) -> ChatConfig {
        if self.dark {
            chat.start_dark = true;
        }
        if self.hide_sidebar {
            chat.show_sidebar = false;
        }
        if let Some(ms) = self.reply_delay_ms {
            chat.reply_delay_ms = ms;
        }
        chat
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info,legalmind=debug"
        }
    }
}

/// Load the chat config and lay `config`'s overrides on top.
pub fn resolve_chat_config(config: &AppConfig, dirs: &XdgDirs) -> anyhow::Result<ChatConfig> {
    let loaded = ChatConfig::load(config.config_path.as_deref(), dirs)?;
    let chat = config.apply(loaded);
    chat.validate()?;
    Ok(chat)
}

/// Single-threaded runtime: reply timers, input and rendering share one thread.
pub fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI feature is not enabled, the configuration is
/// invalid, or the terminal cannot host the widget.
#[cfg(feature = "tui")]
pub fn run_tui(config: AppConfig) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::fs::File;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let dirs = XdgDirs::new();
    dirs.ensure_dirs()
        .context("Failed to create LegalMind directories")?;

    // stdout belongs to the terminal UI, so log to a file
    let log_path = dirs.log_file();
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .init();

    let chat = resolve_chat_config(&config, &dirs)?;
    tracing::info!(?chat, "Configuration loaded");

    let picker_root = std::env::current_dir().context("Failed to read working directory")?;

    let runtime = build_runtime().context("Failed to create Tokio runtime")?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, async { crate::tui::run(chat, picker_root).await })
}

#[cfg(not(feature = "tui"))]
pub fn run_tui(_config: AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("TUI feature not enabled. Recompile with --features tui")
}
