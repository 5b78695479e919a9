//! Access to the board REST backend
//!
//! The backend owns all persistent data and assigns every identifier. This
//! module describes its contract as the [`Backend`] trait so the store can
//! be driven by the real HTTP client or by an in-process fake.

mod http;
#[cfg(test)]
pub(crate) mod memory;
pub mod payload;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::board::{Board, Category, Clue, Id};

pub use http::HttpBackend;
pub use payload::{BoardPatch, CategoryUpdate, ClueForm, ClueUpdate, NewBoard, NewCategory, NewClue};

/// Result type for backend operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures that can occur while talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        /// Underlying builder failure
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent.
    #[error("failed to send request to `{path}`")]
    RequestSend {
        /// Request path relative to the base URL
        path: String,
        /// Underlying transport or decoding failure
        #[source]
        source: reqwest::Error,
    },
    /// The backend does not know the requested entity.
    #[error("`{path}` was not found")]
    NotFound {
        /// Request path relative to the base URL
        path: String,
    },
    /// The backend answered with an unexpected status code.
    #[error("backend rejected `{path}` with status {status}: {message}")]
    RequestStatus {
        /// Request path relative to the base URL
        path: String,
        /// Status returned by the backend
        status: StatusCode,
        /// Explanation supplied by the backend, possibly empty
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response from `{path}`")]
    DecodeResponse {
        /// Request path relative to the base URL
        path: String,
        /// Underlying transport or decoding failure
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Short message suitable for showing inline next to a back action
    ///
    /// Prefers the backend's own explanation when it supplied one.
    pub fn message(&self) -> String {
        match self {
            Self::RequestStatus { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// The board/category/clue REST contract
///
/// Every call maps to one endpoint. Mutations return whatever the backend
/// echoes, but callers are expected to refetch the owning board rather than
/// splice the echo into a cache.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /board`
    async fn list_boards(&self) -> ApiResult<Vec<Board>>;

    /// `GET /board/{id}`
    async fn get_board(&self, id: &Id) -> ApiResult<Board>;

    /// `POST /board`
    async fn create_board(&self, board: &NewBoard) -> ApiResult<Board>;

    /// `PATCH /board/{id}`
    async fn update_board(&self, id: &Id, patch: &BoardPatch) -> ApiResult<Board>;

    /// `DELETE /board/{id}`
    async fn delete_board(&self, id: &Id) -> ApiResult<()>;

    /// `POST /category`
    async fn create_category(&self, category: &NewCategory) -> ApiResult<Category>;

    /// `PATCH /category/{id}`
    async fn update_category(&self, id: &Id, update: &CategoryUpdate) -> ApiResult<Category>;

    /// `POST /clue`
    async fn create_clue(&self, clue: &NewClue) -> ApiResult<Clue>;

    /// `PATCH /clue/{id}`
    async fn update_clue(&self, id: &Id, update: &ClueUpdate) -> ApiResult<Clue>;
}
