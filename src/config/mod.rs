//! Configuration management.

mod chat;
mod xdg;

pub use chat::{ChatConfig, ConfigError, CONFIG_FILE_NAME};
pub use xdg::XdgDirs;
