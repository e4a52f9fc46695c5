//! One request/response cycle against the completion endpoint.
//!
//! [`CompletionClient::complete`] is total: every way the exchange can go
//! wrong comes back as a [`CompletionError`], and nothing here touches the
//! transcript or the screen.

use crate::api::transport::{NetworkErrorKind, Transport};
use crate::api::{extract_error_summary, ChatCompletionResponse, ChatMessage, ChatRequest};
use crate::core::message::Turn;
use std::error::Error;
use std::fmt;
use tracing::{debug, error, info};

/// Value shipped in the template config; never a real credential.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

const APOLOGY: &str = "Sorry, I had trouble connecting to the kitchen. ";

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub log_requests: bool,
    pub log_responses: bool,
}

impl CompletionConfig {
    /// The API key, if it is set to something other than blank or the
    /// template placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompletionError {
    /// Missing or placeholder API key; raised before any I/O.
    Configuration,

    /// No response was obtained at all.
    Network {
        kind: NetworkErrorKind,
        message: String,
    },

    /// 401.
    Auth { detail: Option<String> },

    /// 429.
    RateLimit { detail: Option<String> },

    /// 400.
    BadRequest { detail: Option<String> },

    /// 500, 502 or 503.
    ServiceUnavailable { status: u16, detail: Option<String> },

    /// Any other non-2xx status.
    Server {
        status: u16,
        reason: String,
        detail: Option<String>,
    },

    /// 2xx, but no usable assistant message in the body.
    MalformedResponse,
}

impl CompletionError {
    /// Maps a non-success status plus its optional server detail.
    pub fn from_status(status: u16, reason: Option<&str>, detail: Option<String>) -> Self {
        match status {
            401 => CompletionError::Auth { detail },
            429 => CompletionError::RateLimit { detail },
            400 => CompletionError::BadRequest { detail },
            500 | 502 | 503 => CompletionError::ServiceUnavailable { status, detail },
            _ => CompletionError::Server {
                status,
                reason: reason.unwrap_or_default().to_string(),
                detail,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Auth { .. } => Some(401),
            CompletionError::RateLimit { .. } => Some(429),
            CompletionError::BadRequest { .. } => Some(400),
            CompletionError::ServiceUnavailable { status, .. }
            | CompletionError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            CompletionError::Auth { detail }
            | CompletionError::RateLimit { detail }
            | CompletionError::BadRequest { detail }
            | CompletionError::ServiceUnavailable { detail, .. }
            | CompletionError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The assistant-style message shown to the user in place of a reply.
    pub fn user_message(&self) -> String {
        let mut message = match self {
            CompletionError::Configuration => {
                return "⚠️ Configuration Error: Please set your API key \
                        (run `chefbot init`, then edit the config file or set CHEFBOT_API_KEY)."
                    .to_string();
            }
            CompletionError::MalformedResponse => {
                return "Sorry, I received an unexpected response from the kitchen. Please try again."
                    .to_string();
            }
            _ => format!("{APOLOGY}{self}"),
        };

        if let Some(detail) = self.detail() {
            message.push_str("\n\nDetails: ");
            message.push_str(detail);
        }
        message
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Configuration => write!(f, "API key is not configured."),
            CompletionError::Network {
                kind: NetworkErrorKind::Timeout,
                ..
            } => write!(f, "Request timed out. Please try again."),
            CompletionError::Network {
                kind: NetworkErrorKind::Connect,
                ..
            } => write!(
                f,
                "Network error - please check your internet connection."
            ),
            CompletionError::Network { message, .. } => write!(f, "Error: {message}"),
            CompletionError::Auth { .. } => write!(
                f,
                "API key is invalid or expired. Please check your config file."
            ),
            CompletionError::RateLimit { .. } => write!(
                f,
                "Rate limit exceeded. Please wait a moment and try again."
            ),
            CompletionError::BadRequest { .. } => write!(
                f,
                "Invalid request format. Please check the API configuration."
            ),
            CompletionError::ServiceUnavailable { .. } => write!(
                f,
                "The API service is temporarily unavailable. Please try again later."
            ),
            CompletionError::Server { status, reason, .. } => {
                write!(f, "Server error ({status}): {reason}")
            }
            CompletionError::MalformedResponse => {
                write!(f, "Received an unexpected response from the API.")
            }
        }
    }
}

impl Error for CompletionError {}

pub struct CompletionClient<T: Transport> {
    transport: T,
}

impl<T: Transport> CompletionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Asks the endpoint for the assistant turn that follows `transcript`.
    pub async fn complete(
        &self,
        transcript: &[Turn],
        config: &CompletionConfig,
    ) -> Result<Turn, CompletionError> {
        let Some(api_key) = config.usable_api_key() else {
            error!("API key not configured");
            return Err(CompletionError::Configuration);
        };

        let request = ChatRequest {
            model: config.model.clone(),
            messages: transcript.iter().map(ChatMessage::from).collect(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        if config.log_requests {
            info!(
                url = %config.endpoint,
                model = %request.model,
                message_count = request.messages.len(),
                temperature = request.temperature,
                "API request"
            );
        }

        let response = match self
            .transport
            .post_json(&config.endpoint, api_key, &request)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(kind = ?err.kind, %err, "Request failed without a response");
                return Err(CompletionError::Network {
                    kind: err.kind,
                    message: err.message,
                });
            }
        };

        if config.log_responses {
            info!(
                status = response.status,
                status_text = response.reason.as_deref().unwrap_or_default(),
                ok = response.is_success(),
                has_data = !response.body.trim().is_empty(),
                "API response"
            );
        }

        if !response.is_success() {
            let detail = extract_error_summary(&response.body);
            error!(
                status = response.status,
                status_text = response.reason.as_deref().unwrap_or_default(),
                detail = detail.as_deref().unwrap_or_default(),
                "API request failed"
            );
            return Err(CompletionError::from_status(
                response.status,
                response.reason.as_deref(),
                detail,
            ));
        }

        let decoded: ChatCompletionResponse = match serde_json::from_str(&response.body) {
            Ok(decoded) => decoded,
            Err(err) => {
                error!(%err, "Invalid API response body");
                return Err(CompletionError::MalformedResponse);
            }
        };

        match decoded.first_content() {
            Some(content) => {
                debug!(length = content.len(), "Bot reply received");
                Ok(Turn::assistant(content))
            }
            None => {
                error!(choices = decoded.choices.len(), "Invalid API response structure");
                Err(CompletionError::MalformedResponse)
            }
        }
    }
}

#[cfg(test)]
mod tests;
