// src/services/endpoints.rs
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::ClientError,
    message::{ChatReply, ChatRequest, Turn},
    services::session::SessionId,
};

pub const SESSION_HEADER: &str = "X-Session-ID";

/// Source of the prior turns of a session.
#[async_trait]
pub trait HistoryEndpoint: Send + Sync {
    async fn history(&self, session: &SessionId) -> Result<Vec<Turn>, ClientError>;
}

/// Produces a bot reply for one user message.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    async fn send(&self, session: &SessionId, message: &str) -> Result<ChatReply, ClientError>;
}

/// Both endpoints over HTTP against one base URL.
#[derive(Debug, Clone)]
pub struct HttpEndpoints {
    http: Client,
    history_url: Url,
    chat_url: Url,
}

impl HttpEndpoints {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, http: Client) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| ClientError::InvalidUrl(e.to_string()))
        };
        Ok(Self {
            history_url: join("/chat_history")?,
            chat_url: join("/chat")?,
            http,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl HistoryEndpoint for HttpEndpoints {
    async fn history(&self, session: &SessionId) -> Result<Vec<Turn>, ClientError> {
        debug!(session = %session, "GET {}", self.history_url);
        let response = self
            .http
            .get(self.history_url.clone())
            .query(&[("session_id", session.as_str())])
            .send()
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl ChatEndpoint for HttpEndpoints {
    async fn send(&self, session: &SessionId, message: &str) -> Result<ChatReply, ClientError> {
        debug!(session = %session, len = message.len(), "POST {}", self.chat_url);
        let response = self
            .http
            .post(self.chat_url.clone())
            .header(SESSION_HEADER, session.as_str())
            .json(&ChatRequest { message })
            .send()
            .await?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoint_urls() {
        let endpoints = HttpEndpoints::new("http://localhost:5000").unwrap();
        assert_eq!(endpoints.history_url.as_str(), "http://localhost:5000/chat_history");
        assert_eq!(endpoints.chat_url.as_str(), "http://localhost:5000/chat");
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(matches!(
            HttpEndpoints::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
