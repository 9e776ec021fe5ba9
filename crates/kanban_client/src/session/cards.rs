//! Cards.

use super::Session;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, HttpRequest};
use crate::models::{Card, CardPage, Category};
use kanban_storage::TokenStore;
use serde_json::json;

impl<C: HttpClient, S: TokenStore> Session<C, S> {
    /// Loads one page of the signed-in user's cards, optionally filtered.
    ///
    /// Default filters are left off the request: `page` is only sent when
    /// it is non-zero or a search is given, `search` only when non-empty.
    pub async fn get_users_cards(&self, page: u32, search: &str) -> ClientResult<CardPage> {
        let user_id = self.require_user()?;
        let mut request = HttpRequest::get(self.paths.user_cards(&user_id));
        if page != 0 || !search.is_empty() {
            request = request.query("page", page.to_string());
        }
        if !search.is_empty() {
            request = request.query("search", search);
        }
        self.call_json(request, "search cards").await
    }

    /// Creates a card and returns it as stored.
    pub async fn create_card(&self, board_id: &str, card: &Card) -> ClientResult<Card> {
        let request = HttpRequest::post(self.paths.cards(board_id)).json(json!(card));
        self.call_json(request, "create card").await
    }

    /// Lists the cards of a board.
    pub async fn get_cards(&self, board_id: &str) -> ClientResult<Vec<Card>> {
        let request = HttpRequest::get(format!("{}/", self.paths.cards(board_id)));
        self.call_json(request, "load cards").await
    }

    /// Loads one card.
    pub async fn get_card(&self, board_id: &str, card_id: &str) -> ClientResult<Card> {
        let request = HttpRequest::get(self.paths.card(board_id, card_id));
        self.call_json(request, "load card").await
    }

    /// Replaces a card. The card must carry its id.
    pub async fn update_card(&self, board_id: &str, card: &Card) -> ClientResult<()> {
        let card_id = card
            .id
            .as_deref()
            .ok_or_else(|| ClientError::InvalidRequest("card has no id".into()))?;
        let request = HttpRequest::put(self.paths.card(board_id, card_id)).json(json!(card));
        self.call_unit(request, "update card").await
    }

    /// Moves a card to another column.
    pub async fn update_card_category(
        &self,
        board_id: &str,
        card_id: &str,
        state: Category,
    ) -> ClientResult<()> {
        let request = HttpRequest::put(self.paths.card_category(board_id, card_id))
            .json(json!({ "state": state }));
        self.call_unit(request, "update card category").await
    }

    /// Deletes a card.
    pub async fn delete_card(&self, board_id: &str, card_id: &str) -> ClientResult<()> {
        let request = HttpRequest::delete(self.paths.card(board_id, card_id));
        self.call_unit(request, "delete card").await
    }
}
