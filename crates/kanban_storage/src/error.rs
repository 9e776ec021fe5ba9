//! Error types for token store operations.

use std::io;
use thiserror::Error;

/// Result type for token store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or loading a token.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored entry could not be (de)serialized.
    #[error("entry serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored entry belongs to a different name.
    #[error("stored entry is named {found:?}, expected {expected:?}")]
    NameMismatch {
        /// Name this store was opened with.
        expected: String,
        /// Name found on disk.
        found: String,
    },

    /// The store refuses writes (e.g. persistence disabled).
    #[error("token store unavailable: {0}")]
    Unavailable(String),
}
