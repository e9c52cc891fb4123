use async_trait::async_trait;
use log::debug;
use reqwest::header::{ HeaderMap, HeaderValue, CONTENT_TYPE };
use reqwest::{ Client as HttpClient, Response };
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::{ ApiError, ChatApi };
use crate::models::chat::{ ChatHistory, ChatList, ChatRequest, ChatResponse };

/// reqwest-backed implementation of [`ChatApi`]. Holds one shared HTTP
/// client; individual operations share nothing else.
pub struct HttpChatApi {
    http: HttpClient,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| ApiError::BaseUrl {
            url: base_url.to_string(),
            source: e,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    fn item_url(&self, chat_id: &str) -> String {
        format!("{}/chat/{}", self.base_url, chat_id)
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn create_chat(&self, message: &str) -> Result<ChatResponse, ApiError> {
        let url = self.collection_url();
        let body = ChatRequest {
            message: message.to_string(),
        };
        debug!("POST {}", url);

        let resp = self.http.post(&url).json(&body).send().await?;
        decode(resp).await
    }

    async fn update_chat(&self, chat_id: &str, message: &str) -> Result<ChatResponse, ApiError> {
        let url = self.item_url(chat_id);
        let body = ChatRequest {
            message: message.to_string(),
        };
        debug!("PUT {}", url);

        let resp = self.http.put(&url).json(&body).send().await?;
        decode(resp).await
    }

    async fn list_chats(&self) -> Result<ChatList, ApiError> {
        let url = self.collection_url();
        debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        decode(resp).await
    }

    async fn get_chat(&self, chat_id: &str) -> Result<ChatHistory, ApiError> {
        let url = self.item_url(chat_id);
        debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        decode(resp).await
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<(), ApiError> {
        let url = self.item_url(chat_id);
        debug!("DELETE {}", url);

        let resp = self.http.delete(&url).send().await?;
        check_status(resp).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let resp = check_status(resp).await?;
    resp.json::<T>().await.map_err(ApiError::Decode)
}

async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            code: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}
