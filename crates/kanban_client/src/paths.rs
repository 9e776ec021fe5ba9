//! Resource paths of the board API.

use crate::config::ClientConfig;
use std::fmt::Display;
use urlencoding::encode;

/// Builds resource paths below the API root.
///
/// Caller-supplied segments are percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    root: String,
}

impl ApiPaths {
    /// Creates paths rooted at the configured API root.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            root: config.api_root(),
        }
    }

    /// Returns the API root, e.g. `/wodss3/api`.
    pub fn root(&self) -> &str {
        &self.root
    }

    fn at(&self, tail: impl Display) -> String {
        format!("{}{}", self.root, tail)
    }

    /// `/login`
    pub fn login(&self) -> String {
        self.at("/login")
    }

    /// `/users`
    pub fn users(&self) -> String {
        self.at("/users")
    }

    /// `/users/me`
    pub fn me(&self) -> String {
        self.at("/users/me")
    }

    /// `/users/{id}`
    pub fn user(&self, user_id: &str) -> String {
        self.at(format_args!("/users/{}", encode(user_id)))
    }

    /// `/users/{username}/activate/`
    pub fn activation(&self, username: &str) -> String {
        self.at(format_args!("/users/{}/activate/", encode(username)))
    }

    /// `/users/resetPassword/`
    pub fn reset_request(&self) -> String {
        self.at("/users/resetPassword/")
    }

    /// `/users/{username}/resetPassword/`
    pub fn password_reset(&self, username: &str) -> String {
        self.at(format_args!("/users/{}/resetPassword/", encode(username)))
    }

    /// `/users/findusers/{query}`
    pub fn find_users(&self, query: &str) -> String {
        self.at(format_args!("/users/findusers/{}", encode(query)))
    }

    /// `/users/{id}/boards`
    pub fn user_boards(&self, user_id: &str) -> String {
        self.at(format_args!("/users/{}/boards", encode(user_id)))
    }

    /// `/users/{id}/cards`
    pub fn user_cards(&self, user_id: &str) -> String {
        self.at(format_args!("/users/{}/cards", encode(user_id)))
    }

    /// `/boards/`
    pub fn boards(&self) -> String {
        self.at("/boards/")
    }

    /// `/boards/{id}`
    pub fn board(&self, board_id: &str) -> String {
        self.at(format_args!("/boards/{}", encode(board_id)))
    }

    /// `/boards/{id}/owner`
    pub fn board_owner(&self, board_id: &str) -> String {
        self.at(format_args!("/boards/{}/owner", encode(board_id)))
    }

    /// `/boards/{id}/members`
    pub fn board_members(&self, board_id: &str) -> String {
        self.at(format_args!("/boards/{}/members", encode(board_id)))
    }

    /// `/boards/{id}/members/{username}`
    pub fn board_member(&self, board_id: &str, username: &str) -> String {
        self.at(format_args!(
            "/boards/{}/members/{}",
            encode(board_id),
            encode(username)
        ))
    }

    /// `/boards/{b}/cards`
    pub fn cards(&self, board_id: &str) -> String {
        self.at(format_args!("/boards/{}/cards", encode(board_id)))
    }

    /// `/boards/{b}/cards/{c}`
    pub fn card(&self, board_id: &str, card_id: &str) -> String {
        self.at(format_args!(
            "/boards/{}/cards/{}",
            encode(board_id),
            encode(card_id)
        ))
    }

    /// `/boards/{b}/cards/{c}/category`
    pub fn card_category(&self, board_id: &str, card_id: &str) -> String {
        format!("{}/category", self.card(board_id, card_id))
    }

    /// `/boards/{b}/cards/{c}/files`
    pub fn files(&self, board_id: &str, card_id: &str) -> String {
        format!("{}/files", self.card(board_id, card_id))
    }

    /// `/boards/{b}/cards/{c}/files/{f}`
    pub fn file(&self, board_id: &str, card_id: &str, file_id: &str) -> String {
        format!("{}/files/{}", self.card(board_id, card_id), encode(file_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_under_prefix() {
        let paths = ApiPaths::new(&ClientConfig::default());
        assert_eq!(paths.login(), "/wodss3/api/login");
        assert_eq!(paths.boards(), "/wodss3/api/boards/");
        assert_eq!(paths.user_boards("user"), "/wodss3/api/users/user/boards");
        assert_eq!(
            paths.file("b1", "c1", "f1"),
            "/wodss3/api/boards/b1/cards/c1/files/f1"
        );
        assert_eq!(
            paths.card_category("b1", "c1"),
            "/wodss3/api/boards/b1/cards/c1/category"
        );
        assert_eq!(
            paths.password_reset("user"),
            "/wodss3/api/users/user/resetPassword/"
        );
    }

    #[test]
    fn segments_are_encoded() {
        let paths = ApiPaths::new(&ClientConfig::default().with_path_prefix(""));
        assert_eq!(
            paths.find_users("jane doe/x"),
            "/api/users/findusers/jane%20doe%2Fx"
        );
        assert_eq!(
            paths.board_member("b1", "a@b.c"),
            "/api/boards/b1/members/a%40b.c"
        );
    }
}
