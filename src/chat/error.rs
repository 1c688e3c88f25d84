//! Error types for the chat core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building conversation state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message text must not be empty")]
    EmptyText,
    #[error("Path has no file name: {}", .0.display())]
    NoFileName(PathBuf),
}
