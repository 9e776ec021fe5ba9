//! Card commands.

use super::{done, report, CommandResult};
use kanban_client::{Card, Category, HttpClient, Session};
use kanban_storage::TokenStore;

/// Lists the signed-in user's cards.
pub async fn mine<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    page: u32,
    search: &str,
) -> CommandResult {
    report(&session.get_users_cards(page, search).await?)
}

/// Lists the cards of a board.
pub async fn list<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
) -> CommandResult {
    report(&session.get_cards(board).await?)
}

/// Shows a card.
pub async fn show<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    card: &str,
) -> CommandResult {
    report(&session.get_card(board, card).await?)
}

/// Creates a card.
pub async fn create<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    name: String,
    description: String,
    state: Category,
) -> CommandResult {
    let card = Card::new(name)
        .with_description(description)
        .with_state(state);
    report(&session.create_card(board, &card).await?)
}

/// Moves a card to another column.
pub async fn move_to<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    card: &str,
    state: Category,
) -> CommandResult {
    session.update_card_category(board, card, state).await?;
    done("card moved")
}

/// Deletes a card.
pub async fn delete<C: HttpClient, S: TokenStore>(
    session: &Session<C, S>,
    board: &str,
    card: &str,
) -> CommandResult {
    session.delete_card(board, card).await?;
    done("card deleted")
}
