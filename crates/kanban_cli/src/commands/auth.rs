//! Session and account onboarding commands.

use super::{done, report, CliError, CommandResult};
use kanban_client::{HttpClient, NewUser, Session, TokenSave};
use kanban_storage::TokenStore;
use serde_json::json;

/// Logs in and persists the token.
pub async fn login<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    username: &str,
    password: &str,
) -> CommandResult {
    let token = session.login(username, password).await?;
    if session.save_token(&token) == TokenSave::Rejected {
        return Err(CliError::UnusableToken.into());
    }
    Ok(json!({
        "result": "logged in",
        "user": session.user_id(),
        "locale": session.locale(),
    }))
}

/// Forgets the token.
pub fn logout<C: HttpClient, S: TokenStore>(session: &Session<C, S>) -> CommandResult {
    session.logout();
    done("logged out")
}

/// Shows the token claims, or the server's record with `remote`.
pub async fn whoami<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    remote: bool,
) -> CommandResult {
    if remote {
        return report(&session.current_user().await?);
    }
    match session.user_infos() {
        Some(claims) => report(&claims),
        None => done("not logged in"),
    }
}

/// Registers an account.
pub async fn register<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    username: String,
    email: String,
    password: String,
    displayname: String,
    language: String,
) -> CommandResult {
    let user = NewUser {
        username,
        password,
        email,
        displayname,
        language,
    };
    session.create_user(&user).await?;
    done("registration mail sent")
}

/// Activates an account.
pub async fn activate<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    username: &str,
    token: &str,
) -> CommandResult {
    session.activate_user(username, token).await?;
    done("account activated")
}

/// Requests a reset mail.
pub async fn reset_request<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    email: &str,
) -> CommandResult {
    session.request_password_reset(email).await?;
    done("reset mail sent")
}

/// Checks a reset token.
pub async fn reset_check<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    username: &str,
    token: &str,
) -> CommandResult {
    session.check_reset_token(username, token).await?;
    done("reset token valid")
}

/// Sets a new password.
pub async fn reset<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    username: &str,
    token: &str,
    password: &str,
) -> CommandResult {
    session.reset_password(username, token, password).await?;
    done("password changed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_client::HttpMethod;
    use kanban_testkit::prelude::*;

    #[tokio::test]
    async fn login_persists_token() {
        let (session, server) = test_session();
        let token = TokenBuilder::new("alice")
            .language("EN")
            .expires_in(chrono::Duration::hours(1))
            .issue();
        server.on_json(HttpMethod::Post, "/wodss3/api/login", 200, json!({ "token": token }));

        let report = login(&session, "alice", "pw").await.unwrap();
        assert_eq!(report["user"], "alice");
        assert_eq!(report["locale"], "en");
        assert_eq!(session.get_token(), Some(token));
    }

    #[tokio::test]
    async fn login_rejects_unusable_token() {
        let (session, server) = test_session();
        server.on_json(HttpMethod::Post, "/wodss3/api/login", 200, json!({ "token": "bad.token" }));

        let err = login(&session, "alice", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "server issued a token that failed validation");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn whoami_reads_claims() {
        let (session, _server) = test_session();
        assert_eq!(whoami(&session, false).await.unwrap()["result"], "not logged in");

        let (session, _server) = signed_in_session("bob");
        let report = whoami(&session, false).await.unwrap();
        assert_eq!(report["sub"], "bob");
        assert_eq!(report["email"], "bob@example.com");

        logout(&session).unwrap();
        assert!(!session.is_authenticated());
    }
}
