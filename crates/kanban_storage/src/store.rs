//! Token store trait definition.

use crate::error::StoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Default name of the stored entry.
pub const DEFAULT_ENTRY_NAME: &str = "token";

/// A durable, single-slot store for the current session token.
///
/// Stores behave like a browser cookie: one named entry holding the raw
/// token string, retained until its expiry. Stores do not interpret the
/// token; validation is the caller's job.
///
/// # Invariants
///
/// - `put` overwrites any existing entry
/// - `get` never returns an entry whose expiry has passed
/// - `clear` is idempotent
/// - Implementations must be `Send + Sync`
pub trait TokenStore: Send + Sync {
    /// Stores `token`, replacing any existing entry.
    ///
    /// `expires` governs retention; `None` keeps the entry for the
    /// lifetime of the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be persisted.
    fn put(&self, token: &str, expires: Option<DateTime<Utc>>) -> StoreResult<()>;

    /// Returns the stored token, or `None` if absent or expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be read.
    fn get(&self) -> StoreResult<Option<String>>;

    /// Removes the stored token. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing entry cannot be removed.
    fn clear(&self) -> StoreResult<()>;
}

/// A stored token with its retention deadline.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    /// Entry name.
    pub name: String,
    /// Raw token string.
    pub value: String,
    /// Retention deadline, `None` for session entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl TokenEntry {
    /// Creates a new entry.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires,
        }
    }

    /// Returns true if the entry should be evicted at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }
}

impl std::fmt::Debug for TokenEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEntry")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("expires", &self.expires)
            .finish()
    }
}

impl Drop for TokenEntry {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}
