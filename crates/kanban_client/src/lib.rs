//! # Kanban Client
//!
//! Session facade and request gateway for the kanban board REST API.
//!
//! This crate provides:
//! - [`Session`]: login, logout, claims of the signed-in user, and every
//!   board, card and file call of the API
//! - [`Gateway`]: uniform failure mapping and the shared [`OperationStatus`]
//! - [`HttpClient`]: the transport seam, with a reqwest implementation
//!   behind the `reqwest` feature
//!
//! ## Failure messages
//!
//! Every failed call yields a [`RequestFailure`] whose text is exactly what
//! the operation status shows, e.g. `could not load board (server path not
//! valid)`. A `result` field in the server's reply always wins.
//!
//! ## Sessions
//!
//! The session token lives in a [`kanban_storage::TokenStore`] with an
//! in-memory copy as fallback. [`Session::get_token`] is the single
//! authority for "signed in": it returns a token only if it is well-formed
//! and unexpired. Tokens are decoded for display and locale only, never
//! verified.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gateway;
mod http;
mod models;
mod paths;
#[cfg(feature = "reqwest")]
mod reqwest_client;
mod session;
mod tokens;

pub use config::{ClientConfig, API_ROOT, DEFAULT_PATH_PREFIX};
pub use error::{ClientError, ClientResult, FailureKind, RequestFailure};
pub use gateway::{map_failure, Gateway, OperationStatus, StatusEvent, StatusPhase};
pub use http::{
    FileUpload, HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestBody, TransportError,
};
pub use models::{
    Board, BoardSummary, BoardUpdate, Card, CardPage, Category, Created, DueDate, FileContent,
    FileInfo, NewUser, ResultMessage, TokenReply, User, UserUpdate,
};
pub use paths::ApiPaths;
#[cfg(feature = "reqwest")]
pub use reqwest_client::ReqwestClient;
pub use session::{AuthState, Session};
pub use tokens::{SessionTokens, TokenSave};
