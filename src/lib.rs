//! LegalMind Library
//!
//! The chat core (message log, renderers, reply simulator) and the terminal
//! front end that hosts it.

pub mod chat;
pub mod config;
pub mod runner;

#[cfg(feature = "tui")]
pub mod tui;
