//! # Kanban Testkit
//!
//! Test utilities for the kanban session client.
//!
//! This crate provides:
//! - A token factory issuing unsigned tokens with chosen claims
//! - A scripted [`MockHttpClient`] that records every request
//! - Token stores for failure scenarios
//! - Session fixtures wired to the mock
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kanban_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn loads_boards() {
//!     let (session, server) = signed_in_session("user");
//!     server.on_json(HttpMethod::Get, "/wodss3/api/users/user/boards", 200, json!([]));
//!     assert!(session.get_boards().await.unwrap().is_empty());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mock;
pub mod stores;
pub mod tokens;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::mock::*;
    pub use crate::stores::*;
    pub use crate::tokens::*;
}

pub use fixtures::*;
pub use generators::*;
pub use mock::*;
pub use stores::*;
pub use tokens::*;
