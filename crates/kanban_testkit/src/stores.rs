//! Token stores for failure scenarios.

use chrono::{DateTime, Utc};
use kanban_storage::{StoreError, StoreResult, TokenStore};

/// A store whose every operation fails, like a browser with cookies disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingTokenStore;

impl TokenStore for FailingTokenStore {
    fn put(&self, _token: &str, _expires: Option<DateTime<Utc>>) -> StoreResult<()> {
        Err(StoreError::Unavailable("storage disabled".into()))
    }

    fn get(&self) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("storage disabled".into()))
    }

    fn clear(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("storage disabled".into()))
    }
}
