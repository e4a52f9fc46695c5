use crate::api::transport::{HttpResponse, NetworkErrorKind, Transport, TransportError};
use crate::api::ChatRequest;
use crate::core::completion::CompletionConfig;
use crate::core::message::Role;
use crate::ui::presenter::Presenter;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub type RecordedRequest = (String, String, ChatRequest);

/// Transport that replays canned responses and records what was sent. The
/// last scripted response repeats once the queue is down to one entry.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(content: &str) -> Self {
        Self::new(vec![Ok(ok_response(content))])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &ChatRequest,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), api_key.to_string(), body.clone()));

        let mut responses = self.responses.lock().unwrap();
        let next = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };
        next.unwrap_or_else(|| {
            Err(TransportError::new(
                NetworkErrorKind::Other,
                "no scripted response",
            ))
        })
    }
}

pub fn ok_response(content: &str) -> HttpResponse {
    let body = serde_json::json!({
        "id": "chatcmpl-test",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    });
    HttpResponse {
        status: 200,
        reason: Some("OK".to_string()),
        body: body.to_string(),
    }
}

pub fn status_response(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        reason: None,
        body: String::new(),
    }
}

pub fn test_completion_config() -> CompletionConfig {
    CompletionConfig {
        endpoint: "https://api.test.com/v1/chat/completions".to_string(),
        api_key: Some("sk-test".to_string()),
        model: "test-model".to_string(),
        temperature: 0.7,
        max_tokens: None,
        log_requests: true,
        log_responses: true,
    }
}

/// Presenter that remembers every call for assertions.
#[derive(Default)]
pub struct RecordingPresenter {
    pub messages: Vec<(Role, String)>,
    pub input_toggles: Vec<bool>,
}

impl Presenter for RecordingPresenter {
    fn append_message(&mut self, role: Role, text: &str) {
        self.messages.push((role, text.to_string()));
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_toggles.push(enabled);
    }
}
