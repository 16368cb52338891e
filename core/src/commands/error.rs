//! Error types for chat command parsing

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("not a command: {0:?}")]
    NotSlashCommand(String),

    #[error("unknown command /{0}")]
    UnknownCommand(String),
}
