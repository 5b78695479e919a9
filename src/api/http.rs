//! `reqwest` implementation of the backend contract

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    ApiError, ApiResult, Backend, BoardPatch, CategoryUpdate, ClueUpdate, NewBoard, NewCategory,
    NewClue,
};
use crate::{
    board::{Board, Category, Clue, Id},
    config::ClientConfig,
};

/// Backend reached over HTTP with JSON bodies
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// Creates a client for the backend described by `config`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuilder`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| ApiError::ClientBuilder { source })?;

        Ok(Self {
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL every path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn dispatch(&self, path: &str, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        debug!(path, "sending backend request");
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(path, %status, error = %err, "failed to read error body");
                    String::new()
                }
            };
            let message = extract_message(&body);
            warn!(path, %status, reason = %message, "backend rejected request");
            return Err(ApiError::RequestStatus {
                path: path.to_string(),
                status,
                message,
            });
        }

        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> ApiResult<T> {
        self.dispatch(path, request)
            .await?
            .json()
            .await
            .map_err(|source| ApiError::DecodeResponse {
                path: path.to_string(),
                source,
            })
    }
}

/// Pulls a human-readable message out of an error body
///
/// Backends answer with `{"message": "..."}`, `{"message": ["...", ...]}` or
/// `{"error": "..."}`; anything else is returned verbatim.
fn extract_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let field = value.get("message").or_else(|| value.get("error"));
    match field {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(serde_json::Value::Array(messages)) => messages
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_boards(&self) -> ApiResult<Vec<Board>> {
        let path = "board";
        self.send(path, self.client.get(self.url(path))).await
    }

    async fn get_board(&self, id: &Id) -> ApiResult<Board> {
        let path = format!("board/{id}");
        self.send(&path, self.client.get(self.url(&path))).await
    }

    async fn create_board(&self, board: &NewBoard) -> ApiResult<Board> {
        let path = "board";
        self.send(path, self.client.post(self.url(path)).json(board))
            .await
    }

    async fn update_board(&self, id: &Id, patch: &BoardPatch) -> ApiResult<Board> {
        let path = format!("board/{id}");
        self.send(&path, self.client.patch(self.url(&path)).json(patch))
            .await
    }

    async fn delete_board(&self, id: &Id) -> ApiResult<()> {
        let path = format!("board/{id}");
        self.dispatch(&path, self.client.delete(self.url(&path)))
            .await
            .map(|_| ())
    }

    async fn create_category(&self, category: &NewCategory) -> ApiResult<Category> {
        let path = "category";
        self.send(path, self.client.post(self.url(path)).json(category))
            .await
    }

    async fn update_category(&self, id: &Id, update: &CategoryUpdate) -> ApiResult<Category> {
        let path = format!("category/{id}");
        self.send(&path, self.client.patch(self.url(&path)).json(update))
            .await
    }

    async fn create_clue(&self, clue: &NewClue) -> ApiResult<Clue> {
        let path = "clue";
        self.send(path, self.client.post(self.url(path)).json(clue))
            .await
    }

    async fn update_clue(&self, id: &Id, update: &ClueUpdate) -> ApiResult<Clue> {
        let path = format!("clue/{id}");
        self.send(&path, self.client.patch(self.url(&path)).json(update))
            .await
    }
}
