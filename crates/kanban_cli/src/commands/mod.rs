//! CLI command implementations.
//!
//! Every command returns a JSON report that `main` prints.

pub mod auth;
pub mod boards;
pub mod cards;
pub mod files;
pub mod users;

use kanban_client::{ReqwestClient, Session};
use kanban_storage::FileTokenStore;
use serde::Serialize;
use serde_json::{json, Value};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Session type used by the binary.
pub type CliSession = Session<ReqwestClient, FileTokenStore>;

/// Result of a command: a JSON report or an error to print.
pub type CommandResult = Result<Value, Box<dyn std::error::Error>>;

/// Errors raised by the CLI itself.
#[derive(Debug, Error)]
pub enum CliError {
    /// The server answered a login with a token that fails validation.
    #[error("server issued a token that failed validation")]
    UnusableToken,

    /// A local file could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A local file could not be written.
    #[error("cannot write {path}: {source}")]
    WriteFile {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// Serializes a record as the command report.
pub fn report<T: Serialize>(value: &T) -> CommandResult {
    Ok(serde_json::to_value(value)?)
}

/// Report for commands that only confirm.
pub fn done(message: &str) -> CommandResult {
    Ok(json!({ "result": message }))
}
