//! Board commands.

use super::{done, report, CommandResult};
use kanban_client::{BoardUpdate, HttpClient, Session};
use kanban_storage::TokenStore;

/// Lists the signed-in user's boards.
pub async fn list<C: HttpClient, S: TokenStore>(session: &Session<C, S>) -> CommandResult {
    report(&session.get_boards().await?)
}

/// Shows a board.
pub async fn show<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
) -> CommandResult {
    report(&session.get_board(board).await?)
}

/// Creates a board.
pub async fn create<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    name: &str,
) -> CommandResult {
    report(&session.create_board(name).await?)
}

/// Renames a board, keeping owner and members.
pub async fn rename<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    name: String,
) -> CommandResult {
    let current = session.get_board(board).await?;
    let update = BoardUpdate {
        name,
        owner: current.owner,
        members: current.assigned,
    };
    session.update_board(board, &update).await?;
    report(&update)
}

/// Deletes a board.
pub async fn delete<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
) -> CommandResult {
    session.delete_board(board).await?;
    done("board deleted")
}

/// Adds a member.
pub async fn add_member<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    username: &str,
) -> CommandResult {
    session.add_board_member(board, username).await?;
    done("member added")
}

/// Removes a member.
pub async fn remove_member<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    username: &str,
) -> CommandResult {
    session.remove_board_member(board, username).await?;
    done("member removed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_client::{HttpMethod, RequestBody};
    use kanban_testkit::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn rename_keeps_members() {
        let (session, server) = signed_in_session("user");
        server
            .on_json(
                HttpMethod::Get,
                "/wodss3/api/boards/b1",
                200,
                json!({
                    "id": "b1",
                    "name": "Old",
                    "createdby": {"username": "user"},
                    "assigned": [
                        {"username": "user"},
                        {"username": "jane", "displayname": "Jane", "email": null}
                    ],
                    "tasks": []
                }),
            )
            .on_status(HttpMethod::Put, "/wodss3/api/boards/b1", 200);

        rename(&session, "b1", "New".into()).await.unwrap();
        assert_eq!(
            server.last_request().unwrap().body,
            RequestBody::Json(json!({
                "name": "New",
                "owner": {"username": "user", "displayname": "", "email": ""},
                "members": [
                    {"username": "user", "displayname": "", "email": ""},
                    {"username": "jane", "displayname": "Jane", "email": ""}
                ]
            }))
        );
    }

    #[tokio::test]
    async fn list_requires_login() {
        let (session, server) = test_session();
        let err = list(&session).await.unwrap_err();
        assert_eq!(err.to_string(), "not authenticated");
        assert_eq!(server.request_count(), 0);
    }
}
