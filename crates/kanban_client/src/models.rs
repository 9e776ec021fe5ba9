//! Typed records exchanged with the board API.
//!
//! Every field the server may omit defaults when absent or `null`. Records
//! that are sent back to the server keep unknown fields so nothing is dropped
//! on a read-modify-write cycle.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Reads a field the server may send as `null`, falling back to the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A user as embedded in boards and cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Login name, also the user id.
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub displayname: String,
    /// Email address.
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

/// Card column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Not started.
    #[default]
    Todo,
    /// In progress.
    Doing,
    /// Finished.
    Done,
}

impl Category {
    /// All columns in board order.
    pub const ALL: [Category; 3] = [Category::Todo, Category::Doing, Category::Done];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Todo => "TODO",
            Category::Doing => "DOING",
            Category::Done => "DONE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{s}', expected TODO, DOING or DONE"))
    }
}

/// A card due date: epoch milliseconds or a date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DueDate {
    /// Milliseconds since the epoch.
    Millis(i64),
    /// Date text such as `2016-05-22`.
    Text(String),
}

/// A card (the server calls them tasks).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    /// Server-assigned id, `None` before creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Column.
    #[serde(deserialize_with = "null_as_default")]
    pub state: Category,
    /// Free text.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duedate: Option<DueDate>,
    /// Assigned users.
    #[serde(deserialize_with = "null_as_default")]
    pub assigned: Vec<User>,
    /// Creator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub createdby: Option<User>,
    /// Owning board.
    #[serde(rename = "boardId", alias = "boardid", skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    /// Creates a new card in the TODO column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the column.
    pub fn with_state(mut self, state: Category) -> Self {
        self.state = state;
        self
    }
}

/// A board as listed for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSummary {
    /// Board id.
    pub id: String,
    /// Board name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Owner.
    pub owner: Option<User>,
    /// Members.
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<User>,
    /// Card counts per column, TODO, DOING, DONE.
    pub tasks: [u32; 3],
}

/// A board with its cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    /// Board id.
    pub id: String,
    /// Board name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Owner.
    #[serde(alias = "createdby")]
    pub owner: Option<User>,
    /// Members.
    #[serde(deserialize_with = "null_as_default")]
    pub assigned: Vec<User>,
    /// Cards.
    #[serde(deserialize_with = "null_as_default")]
    pub tasks: Vec<Card>,
}

impl Board {
    /// Returns the cards in one column.
    pub fn cards_in(&self, state: Category) -> impl Iterator<Item = &Card> {
        self.tasks.iter().filter(move |card| card.state == state)
    }
}

/// Body of a board update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    /// New name.
    pub name: String,
    /// Owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    /// Members.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<User>,
}

/// One page of a user's cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardPage {
    /// Page number, zero-based.
    pub page: u32,
    /// Cards per page.
    pub pagesize: u32,
    /// Total number of pages.
    pub pagecount: u32,
    /// Cards on this page.
    pub content: Vec<Card>,
    /// Card counts per column across all pages.
    pub tasks: [u32; 3],
}

/// A file attached to a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    /// File id.
    pub id: String,
    /// File name.
    #[serde(alias = "filename", deserialize_with = "null_as_default")]
    pub name: String,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// MIME type reported by the server.
    pub content_type: Option<String>,
    /// Raw contents.
    pub bytes: Vec<u8>,
}

/// Reply to a create call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    /// Id of the new resource.
    pub id: String,
}

/// Reply carrying a freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReply {
    /// Compact token.
    pub token: String,
}

/// Reply carrying a plain server message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultMessage {
    /// Message text.
    pub result: Option<String>,
}

/// Body of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub displayname: String,
    /// Language code, e.g. `de`.
    pub language: String,
}

/// Body of an update to the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name.
    pub displayname: String,
    /// New language code.
    pub language: String,
    /// Current password.
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    /// New password, empty to keep the current one.
    pub password: String,
}
