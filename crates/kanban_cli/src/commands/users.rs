//! Account and user search commands.

use super::{done, report, CliError, CommandResult};
use kanban_client::{HttpClient, Session, TokenSave, UserUpdate};
use kanban_storage::TokenStore;

/// Updates the signed-in account and stores the reissued token.
pub async fn update<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    displayname: String,
    language: String,
    old_password: String,
    new_password: String,
) -> CommandResult {
    let update = UserUpdate {
        displayname,
        language,
        old_password,
        password: new_password,
    };
    let token = session.update_user_infos(&update).await?;
    if session.save_token(&token) == TokenSave::Rejected {
        return Err(CliError::UnusableToken.into());
    }
    match session.user_infos() {
        Some(claims) => report(&claims),
        None => done("account updated"),
    }
}

/// Deletes the signed-in account and ends the session.
pub async fn delete<C: HttpClient, S: TokenStore>(session: &Session<C, S>) -> CommandResult {
    session.delete_user().await?;
    session.logout();
    done("account deleted")
}

/// Finds users.
pub async fn find<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    query: &str,
) -> CommandResult {
    report(&session.find_users(query).await?)
}
