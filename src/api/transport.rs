//! HTTP seam between the completion client and the network.
//!
//! The client only needs "POST this JSON, give me status and body". Keeping
//! that behind [`Transport`] lets tests count calls and script responses
//! without a server.

use crate::api::ChatRequest;
use async_trait::async_trait;
use std::fmt;

/// Status line and body of a response that was actually received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why no response was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Connect,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: NetworkErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &ChatRequest,
    ) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest` client.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            NetworkErrorKind::Timeout
        } else if err.is_connect() {
            NetworkErrorKind::Connect
        } else {
            NetworkErrorKind::Other
        };
        TransportError::new(kind, err.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &ChatRequest,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {api_key}"))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let reason = status.canonical_reason().map(str::to_string);
        let body = if status.is_success() {
            response.text().await?
        } else {
            // Error bodies are optional; a failed read is treated as empty.
            response.text().await.unwrap_or_default()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}
