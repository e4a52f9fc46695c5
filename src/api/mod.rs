//! Wire payloads of the chat-completion endpoint.
//!
//! Response types default every field so that a well-formed but unexpected
//! body decodes to an empty value instead of failing; callers check for the
//! shape they need.

pub mod transport;

use crate::core::message::Turn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl From<&Turn> for ChatMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChatCompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it carries a non-blank message.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .filter(|content| !content.trim().is_empty())
    }
}

/// Pulls a human-readable summary out of an error body. Accepts
/// `{"error":{"message":..}}`, `{"error":".."}` and `{"message":..}`; anything
/// else, including a body that is not JSON, yields `None`.
pub fn extract_error_summary(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body.trim()).unwrap_or(Value::Null);

    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_max_tokens() {
        let request = ChatRequest {
            model: "llama-3.3-70b".to_string(),
            messages: vec![ChatMessage::from(&Turn::user("Hello"))],
            temperature: 0.5,
            max_tokens: None,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama-3.3-70b",
                "messages": [{"role": "user", "content": "Hello"}],
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn first_content_requires_a_non_blank_message() {
        let parse = |raw: &str| serde_json::from_str::<ChatCompletionResponse>(raw).unwrap();

        assert_eq!(
            parse(r#"{"choices":[{"message":{"content":"Hi"}}],"id":"x"}"#).first_content(),
            Some("Hi")
        );
        assert_eq!(parse(r#"{"choices":[]}"#).first_content(), None);
        assert_eq!(parse(r#"{}"#).first_content(), None);
        assert_eq!(parse(r#"{"choices":[{}]}"#).first_content(), None);
        assert_eq!(
            parse(r#"{"choices":[{"message":{"content":"  "}}]}"#).first_content(),
            None
        );
    }

    #[test]
    fn error_summary_handles_common_shapes() {
        assert_eq!(
            extract_error_summary(r#"{"error":{"message":"bad   key\n"}}"#).as_deref(),
            Some("bad key")
        );
        assert_eq!(
            extract_error_summary(r#"{"error":"quota"}"#).as_deref(),
            Some("quota")
        );
        assert_eq!(
            extract_error_summary(r#"{"message":"nope"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(extract_error_summary("<html>502</html>"), None);
        assert_eq!(extract_error_summary(""), None);
        assert_eq!(extract_error_summary(r#"{"error":{}}"#), None);
    }
}
