//! # Kanban Storage
//!
//! Durable storage for the session token.
//!
//! Stores are **opaque, single-slot** holders: they keep one named entry
//! with the raw token string and a retention deadline, and evict it once
//! the deadline passes. They never decode or validate the token.
//!
//! ## Available Stores
//!
//! - [`InMemoryTokenStore`] - For tests and ephemeral sessions
//! - [`FileTokenStore`] - For sessions that survive process restarts

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileTokenStore;
pub use memory::InMemoryTokenStore;
pub use store::{TokenEntry, TokenStore, DEFAULT_ENTRY_NAME};
