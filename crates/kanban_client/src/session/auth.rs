//! Authentication and claims of the signed-in user.

use super::Session;
use crate::error::ClientResult;
use crate::http::{HttpClient, HttpRequest};
use crate::models::TokenReply;
use crate::tokens::TokenSave;
use kanban_storage::TokenStore;
use kanban_token::{decode_claims, Claims, Locale};
use serde_json::json;

/// Authentication state as observed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No valid token is reachable.
    Anonymous,
    /// A valid token is reachable.
    Authenticated,
}

impl<C: HttpClient, S: TokenStore> Session<C, S> {
    /// Logs in and returns the issued token.
    ///
    /// The token is not persisted; pass it to [`Session::save_token`].
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        let request = HttpRequest::post(self.paths.login())
            .json(json!({ "username": username, "password": password }))
            .skip_auth();
        let reply: TokenReply = self.call_json(request, "login").await?;
        tracing::info!(username, "logged in");
        Ok(reply.token)
    }

    /// Stores `token` if it is well-formed and unexpired.
    pub fn save_token(&self, token: &str) -> TokenSave {
        self.tokens.save(token)
    }

    /// Returns the session token, or `None` when signed out or expired.
    pub fn get_token(&self) -> Option<String> {
        self.tokens.current()
    }

    /// Returns the authentication state.
    pub fn auth_state(&self) -> AuthState {
        if self.get_token().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    /// Returns true if a valid token is reachable.
    pub fn is_authenticated(&self) -> bool {
        self.auth_state() == AuthState::Authenticated
    }

    /// Returns the claims of the current token.
    pub fn user_infos(&self) -> Option<Claims> {
        let token = self.get_token()?;
        decode_claims(&token).ok()
    }

    /// Returns the signed-in user's id (the token subject).
    pub fn user_id(&self) -> Option<String> {
        self.user_infos()?.sub
    }

    /// Returns the raw language claim.
    pub fn language(&self) -> Option<String> {
        self.user_infos()?.language
    }

    /// Returns the locale derived from the language claim.
    pub fn locale(&self) -> Locale {
        Locale::from_claim(self.language().as_deref())
    }

    /// Forgets the session token. Idempotent.
    pub fn logout(&self) {
        self.tokens.clear();
        tracing::info!("logged out");
    }

    /// Activates a registered account.
    pub async fn activate_user(&self, username: &str, activation_token: &str) -> ClientResult<()> {
        let request = HttpRequest::post(self.paths.activation(username))
            .json(json!({ "token": activation_token }))
            .skip_auth();
        self.call_unit(request, "activation").await
    }

    /// Asks the server to mail a password reset link.
    pub async fn request_password_reset(&self, email: &str) -> ClientResult<()> {
        let request = HttpRequest::post(self.paths.reset_request())
            .json(json!({ "text": email }))
            .skip_auth();
        self.call_unit(request, "request password reset").await
    }

    /// Checks a password reset token.
    pub async fn check_reset_token(&self, username: &str, reset_token: &str) -> ClientResult<()> {
        let request = HttpRequest::get(self.paths.password_reset(username))
            .query("token", reset_token)
            .skip_auth();
        self.call_unit(request, "reset password").await
    }

    /// Sets a new password using a reset token.
    pub async fn reset_password(
        &self,
        username: &str,
        reset_token: &str,
        new_password: &str,
    ) -> ClientResult<()> {
        let request = HttpRequest::post(self.paths.password_reset(username))
            .json(json!({ "token": reset_token, "password": new_password }))
            .skip_auth();
        self.call_unit(request, "reset password").await
    }
}
