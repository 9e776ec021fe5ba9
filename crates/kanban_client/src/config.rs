//! Configuration for the session client.

use kanban_storage::DEFAULT_ENTRY_NAME;
use std::time::Duration;

/// Path prefix the board server is deployed under.
pub const DEFAULT_PATH_PREFIX: &str = "/wodss3";

/// Root of the REST API below the path prefix.
pub const API_ROOT: &str = "/api";

/// Configuration for a [`crate::Session`] and its HTTP adapter.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin (e.g., "https://kanban.example.com").
    pub base_url: String,
    /// Deployment prefix prepended to every API path.
    pub path_prefix: String,
    /// Request timeout enforced by the transport.
    pub timeout: Duration,
    /// Name of the token entry, also used as the cookie name.
    pub token_entry: String,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration for the given server origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            timeout: Duration::from_secs(30),
            token_entry: DEFAULT_ENTRY_NAME.to_string(),
            user_agent: concat!("kanban-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sets the deployment path prefix (may be empty).
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        self.path_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the token entry (cookie) name.
    pub fn with_token_entry(mut self, name: impl Into<String>) -> Self {
        self.token_entry = name.into();
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the API root including the deployment prefix, e.g. `/wodss3/api`.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}{}", self.path_prefix, API_ROOT)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.api_root(), "/wodss3/api");
        assert_eq!(config.token_entry, "token");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_builder() {
        let config = ClientConfig::new("https://kanban.example.com")
            .with_path_prefix("/board/")
            .with_timeout(Duration::from_secs(5))
            .with_token_entry("session")
            .with_user_agent("test-agent");

        assert_eq!(config.api_root(), "/board/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token_entry, "session");
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn empty_prefix() {
        let config = ClientConfig::default().with_path_prefix("");
        assert_eq!(config.api_root(), "/api");
    }
}
