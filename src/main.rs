//! LegalMind - chat widget for the terminal
//!
//! Parses the command line and hands over to the TUI runner.

use std::path::PathBuf;

use clap::Parser;
use legalmind::runner::{run_tui, AppConfig};

/// LegalMind - legal assistant chat in your terminal ⚖
#[derive(Parser, Debug)]
#[command(name = "legalmind")]
#[command(version, about, long_about = None)]
struct Args {
    /// Change to this directory before running (the file picker starts here)
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    cwd: Option<String>,

    /// Start in dark mode
    #[arg(long, env = "LEGALMIND_DARK")]
    dark: bool,

    /// Start with the history sidebar hidden
    #[arg(long)]
    hide_sidebar: bool,

    /// Delay before the simulated reply, in milliseconds
    #[arg(long, value_name = "MS", env = "LEGALMIND_REPLY_DELAY_MS")]
    reply_delay_ms: Option<u64>,

    /// Read settings from this JSON file instead of the default location
    #[arg(long, value_name = "FILE", env = "LEGALMIND_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        AppConfig {
            debug: args.debug,
            verbose: args.verbose,
            dark: args.dark,
            hide_sidebar: args.hide_sidebar,
            reply_delay_ms: args.reply_delay_ms,
            config_path: args.config.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Change directory if requested
    if let Some(cwd) = &args.cwd {
        let expanded = shellexpand::tilde(cwd);
        std::env::set_current_dir(expanded.as_ref())?;
    }

    run_tui(AppConfig::from(&args))
}
