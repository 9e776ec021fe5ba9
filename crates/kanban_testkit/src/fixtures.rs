//! Session fixtures.

use crate::mock::MockHttpClient;
use crate::tokens::valid_token;
use kanban_client::{ClientConfig, Session};
use kanban_storage::{FileTokenStore, InMemoryTokenStore};
use tempfile::TempDir;

/// A session wired to a [`MockHttpClient`] and an in-memory store.
pub type TestSession = Session<MockHttpClient, InMemoryTokenStore>;

/// Configuration used by all fixtures: default origin and prefix.
pub fn test_config() -> ClientConfig {
    ClientConfig::default()
}

/// Creates an anonymous session and a handle to its mock server.
pub fn test_session() -> (TestSession, MockHttpClient) {
    let server = MockHttpClient::new();
    let session = Session::new(test_config(), server.clone(), InMemoryTokenStore::new());
    (session, server)
}

/// Creates a session signed in as `sub` and a handle to its mock server.
pub fn signed_in_session(sub: &str) -> (TestSession, MockHttpClient) {
    let (session, server) = test_session();
    let saved = session.save_token(&valid_token(sub));
    assert!(saved.is_stored(), "fixture token was rejected");
    (session, server)
}

/// A file store in a fresh temporary directory.
///
/// Keep the directory alive for as long as the store is used.
pub fn temp_file_store() -> (FileTokenStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let store =
        FileTokenStore::open(&dir.path().join("token")).expect("Failed to open token store");
    (store, dir)
}
