//! Boards and their members.

use super::Session;
use crate::error::ClientResult;
use crate::http::{HttpClient, HttpRequest};
use crate::models::{Board, BoardSummary, BoardUpdate, Created};
use kanban_storage::TokenStore;
use serde_json::json;

impl<C: HttpClient, S: TokenStore> Session<C, S> {
    /// Creates a board owned by the signed-in user.
    pub async fn create_board(&self, name: &str) -> ClientResult<Created> {
        let request = HttpRequest::post(self.paths.boards()).json(json!({ "name": name }));
        self.call_json(request, "create board").await
    }

    /// Lists the boards the signed-in user belongs to.
    pub async fn get_boards(&self) -> ClientResult<Vec<BoardSummary>> {
        let user_id = self.require_user()?;
        let request = HttpRequest::get(self.paths.user_boards(&user_id));
        self.call_json(request, "load boards").await
    }

    /// Loads a board with its cards.
    pub async fn get_board(&self, board_id: &str) -> ClientResult<Board> {
        let request = HttpRequest::get(self.paths.board(board_id));
        self.call_json(request, "load board").await
    }

    /// Updates name, owner and members of a board.
    pub async fn update_board(&self, board_id: &str, update: &BoardUpdate) -> ClientResult<()> {
        let request = HttpRequest::put(self.paths.board(board_id)).json(json!(update));
        self.call_unit(request, "update board").await
    }

    /// Hands a board over to another member.
    pub async fn change_board_owner(&self, board_id: &str, username: &str) -> ClientResult<()> {
        let request = HttpRequest::put(self.paths.board_owner(board_id))
            .json(json!({ "username": username }));
        self.call_unit(request, "change board owner").await
    }

    /// Adds a member to a board.
    pub async fn add_board_member(&self, board_id: &str, username: &str) -> ClientResult<()> {
        let request = HttpRequest::put(self.paths.board_members(board_id))
            .json(json!({ "username": username }));
        self.call_unit(request, "add member to board").await
    }

    /// Removes a member from a board.
    pub async fn remove_board_member(&self, board_id: &str, username: &str) -> ClientResult<()> {
        let request = HttpRequest::delete(self.paths.board_member(board_id, username));
        self.call_unit(request, "delete member from board").await
    }

    /// Deletes a board.
    pub async fn delete_board(&self, board_id: &str) -> ClientResult<()> {
        let request = HttpRequest::delete(self.paths.board(board_id));
        self.call_unit(request, "delete board").await
    }
}
