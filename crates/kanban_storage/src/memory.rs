//! In-memory token store.

use crate::error::StoreResult;
use crate::store::{TokenEntry, TokenStore, DEFAULT_ENTRY_NAME};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// An in-memory token store.
///
/// Suitable for tests and for processes that should forget the session
/// on exit.
///
/// # Example
///
/// ```rust
/// use kanban_storage::{InMemoryTokenStore, TokenStore};
///
/// let store = InMemoryTokenStore::new();
/// store.put("a.b.c", None).unwrap();
/// assert_eq!(store.get().unwrap().as_deref(), Some("a.b.c"));
/// store.clear().unwrap();
/// assert_eq!(store.get().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct InMemoryTokenStore {
    name: String,
    entry: RwLock<Option<TokenEntry>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store using the default entry name.
    #[must_use]
    pub fn new() -> Self {
        Self::named(DEFAULT_ENTRY_NAME)
    }

    /// Creates an empty store with the given entry name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: RwLock::new(None),
        }
    }

    /// Returns the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of the raw entry, expired or not.
    #[must_use]
    pub fn entry(&self) -> Option<TokenEntry> {
        self.entry.read().clone()
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn put(&self, token: &str, expires: Option<DateTime<Utc>>) -> StoreResult<()> {
        *self.entry.write() = Some(TokenEntry::new(self.name.as_str(), token, expires));
        Ok(())
    }

    fn get(&self) -> StoreResult<Option<String>> {
        let now = Utc::now();
        {
            let entry = self.entry.read();
            match entry.as_ref() {
                None => return Ok(None),
                Some(e) if !e.is_expired_at(now) => return Ok(Some(e.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: evict like a cookie jar would.
        let mut entry = self.entry.write();
        if entry.as_ref().is_some_and(|e| e.is_expired_at(now)) {
            *entry = None;
        }
        Ok(None)
    }

    fn clear(&self) -> StoreResult<()> {
        *self.entry.write() = None;
        Ok(())
    }
}
