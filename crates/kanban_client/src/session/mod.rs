//! The session facade.
//!
//! [`Session`] is the public surface of the client: authentication state,
//! claims of the signed-in user, and every call of the board API. Domain
//! calls all take the same shape: build a request against a fixed path,
//! attach the session cookie, and hand the transport future to the
//! [`Gateway`] with a fixed description.

mod auth;
mod boards;
mod cards;
mod files;
mod users;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::gateway::{Gateway, OperationStatus, StatusEvent};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::paths::ApiPaths;
use crate::tokens::SessionTokens;
use kanban_storage::TokenStore;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

pub use auth::AuthState;

/// Client session against one board server.
///
/// # Example
///
/// ```no_run
/// use kanban_client::{ClientConfig, ReqwestClient, Session};
/// use kanban_storage::InMemoryTokenStore;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("http://localhost:8080");
/// let client = ReqwestClient::new(&config)?;
/// let session = Session::new(config, client, InMemoryTokenStore::new());
///
/// let token = session.login("user", "password").await?;
/// let _ = session.save_token(&token);
/// for board in session.get_boards().await? {
///     println!("{} ({})", board.name, board.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Session<C, S> {
    config: ClientConfig,
    client: C,
    gateway: Gateway,
    tokens: SessionTokens<S>,
    paths: ApiPaths,
}

impl<C: HttpClient, S: TokenStore> Session<C, S> {
    /// Creates a session.
    pub fn new(config: ClientConfig, client: C, store: S) -> Self {
        let paths = ApiPaths::new(&config);
        Self {
            config,
            client,
            gateway: Gateway::new(),
            tokens: SessionTokens::new(store),
            paths,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the HTTP client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the token tiers.
    pub fn tokens(&self) -> &SessionTokens<S> {
        &self.tokens
    }

    /// Returns a snapshot of the last operation status.
    pub fn status(&self) -> OperationStatus {
        self.gateway.status()
    }

    /// Subscribes to operation status transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.gateway.subscribe()
    }

    /// Attaches the session cookie unless the request opts out.
    fn authorize(&self, mut request: HttpRequest) -> HttpRequest {
        if request.skip_auth {
            return request;
        }
        if let Some(token) = self.tokens.current() {
            request
                .headers
                .push(("Cookie".to_string(), format!("{}={}", self.config.token_entry, token)));
        }
        request
    }

    async fn call(&self, request: HttpRequest, description: &str) -> ClientResult<HttpResponse> {
        let request = self.authorize(request);
        Ok(self.gateway.handle(self.client.send(request), description).await?)
    }

    async fn call_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        description: &str,
    ) -> ClientResult<T> {
        let request = self.authorize(request);
        Ok(self
            .gateway
            .handle_json(self.client.send(request), description)
            .await?)
    }

    async fn call_unit(&self, request: HttpRequest, description: &str) -> ClientResult<()> {
        let request = self.authorize(request);
        Ok(self
            .gateway
            .handle_unit(self.client.send(request), description)
            .await?)
    }

    /// Returns the signed-in user's id or fails without touching the network.
    fn require_user(&self) -> ClientResult<String> {
        self.user_id().ok_or(ClientError::NotAuthenticated)
    }
}
