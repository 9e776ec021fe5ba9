//! Error types for token decoding.

use thiserror::Error;

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors that can occur while inspecting a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not split into header, claims and signature.
    #[error("malformed token: expected 3 segments, found {segments}")]
    Malformed {
        /// Number of `.`-separated segments found.
        segments: usize,
    },

    /// One of the three segments is empty.
    #[error("malformed token: segment {index} is empty")]
    EmptySegment {
        /// Zero-based index of the empty segment.
        index: usize,
    },

    /// The claims segment is not valid base64.
    #[error("claims segment is not valid base64: {message}")]
    Base64 {
        /// Description of the decoding error.
        message: String,
    },

    /// The claims segment is not a JSON object of the expected shape.
    #[error("claims segment is not valid JSON: {message}")]
    Json {
        /// Description of the parse error.
        message: String,
    },

    /// The `exp` claim is outside the representable time range.
    #[error("expiry claim out of range: {0}")]
    ExpiryOutOfRange(i64),
}

impl From<base64::DecodeError> for TokenError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64 {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}
