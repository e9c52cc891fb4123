pub mod http;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::cli::Args;
use crate::models::chat::{ ChatHistory, ChatList, ChatResponse };

use self::http::HttpChatApi;

/// Failure of a single chat API operation. Every client call returns one of
/// these instead of logging and swallowing, so callers can react.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP response (connect, timeout,
    /// redirect loop, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The configured base URL does not parse.
    #[error("invalid API base URL `{url}`: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Client operations against the chat API. Object safe so the UI can be
/// driven by a stub in tests.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// POST a first message, creating a new chat.
    async fn create_chat(&self, message: &str) -> Result<ChatResponse, ApiError>;

    /// PUT a follow-up message onto an existing chat.
    async fn update_chat(&self, chat_id: &str, message: &str) -> Result<ChatResponse, ApiError>;

    /// GET the ids of all stored chats.
    async fn list_chats(&self) -> Result<ChatList, ApiError>;

    /// GET the message history of one chat.
    async fn get_chat(&self, chat_id: &str) -> Result<ChatHistory, ApiError>;

    /// DELETE one chat.
    async fn delete_chat(&self, chat_id: &str) -> Result<(), ApiError>;
}

pub fn new_client(args: &Args) -> Result<Arc<dyn ChatApi>, ApiError> {
    let client = HttpChatApi::new(&args.api_base_url, args.request_timeout_secs)?;
    Ok(Arc::new(client))
}
