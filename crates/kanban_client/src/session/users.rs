//! User accounts.

use super::Session;
use crate::error::ClientResult;
use crate::http::{HttpClient, HttpRequest};
use crate::models::{NewUser, TokenReply, User, UserUpdate};
use kanban_storage::TokenStore;
use serde_json::json;

impl<C: HttpClient, S: TokenStore> Session<C, S> {
    /// Registers a new account. The server mails an activation token.
    pub async fn create_user(&self, user: &NewUser) -> ClientResult<()> {
        let request = HttpRequest::post(self.paths.users()).json(json!(user));
        self.call_unit(request, "create user").await
    }

    /// Searches users by name or email.
    pub async fn find_users(&self, query: &str) -> ClientResult<Vec<User>> {
        let request = HttpRequest::get(self.paths.find_users(query));
        self.call_json(request, "search users").await
    }

    /// Loads the signed-in user from the server.
    pub async fn current_user(&self) -> ClientResult<User> {
        self.call_json(HttpRequest::get(self.paths.me()), "load user infos")
            .await
    }

    /// Updates the signed-in user and returns the reissued token.
    ///
    /// The token is not persisted; pass it to [`Session::save_token`].
    pub async fn update_user_infos(&self, update: &UserUpdate) -> ClientResult<String> {
        let request = HttpRequest::put(self.paths.me()).json(json!(update));
        let reply: TokenReply = self.call_json(request, "update user infos").await?;
        Ok(reply.token)
    }

    /// Deletes the signed-in user's account.
    pub async fn delete_user(&self) -> ClientResult<()> {
        let user_id = self.require_user()?;
        let request = HttpRequest::delete(self.paths.user(&user_id));
        self.call_unit(request, "delete user").await
    }
}
