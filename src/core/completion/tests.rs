use super::*;
use crate::api::transport::{HttpResponse, TransportError};
use crate::utils::test_utils::{test_completion_config, ScriptedTransport};

fn transcript() -> Vec<Turn> {
    vec![Turn::system("You are a chef."), Turn::user("Hello")]
}

async fn complete_with(
    response: Result<HttpResponse, TransportError>,
) -> Result<Turn, CompletionError> {
    let client = CompletionClient::new(ScriptedTransport::new(vec![response]));
    client
        .complete(&transcript(), &test_completion_config())
        .await
}

#[tokio::test]
async fn placeholder_key_fails_without_network_calls() {
    let client = CompletionClient::new(ScriptedTransport::replying("unused"));

    for key in [Some(PLACEHOLDER_API_KEY.to_string()), Some("  ".to_string()), None] {
        let config = CompletionConfig {
            api_key: key,
            ..test_completion_config()
        };
        let result = client.complete(&transcript(), &config).await;
        assert_eq!(result, Err(CompletionError::Configuration));
    }

    assert_eq!(client.transport().call_count(), 0);
}

#[tokio::test]
async fn request_carries_whole_transcript_and_settings() {
    let client = CompletionClient::new(ScriptedTransport::replying("Hi, chef here!"));
    let config = CompletionConfig {
        max_tokens: Some(2000),
        ..test_completion_config()
    };

    let reply = client
        .complete(&transcript(), &config)
        .await
        .expect("reply");
    assert_eq!(reply, Turn::assistant("Hi, chef here!"));

    let sent = client.transport().requests();
    assert_eq!(sent.len(), 1);
    let (url, api_key, request) = &sent[0];
    assert_eq!(url, &config.endpoint);
    assert_eq!(api_key, "sk-test");
    assert_eq!(request.model, config.model);
    assert_eq!(request.temperature, config.temperature);
    assert_eq!(request.max_tokens, Some(2000));
    let roles: Vec<&str> = request.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["system", "user"]);
}

#[tokio::test]
async fn api_key_is_trimmed_before_use() {
    let client = CompletionClient::new(ScriptedTransport::replying("ok"));
    let config = CompletionConfig {
        api_key: Some(" sk-test \n".to_string()),
        ..test_completion_config()
    };
    client.complete(&transcript(), &config).await.expect("reply");
    assert_eq!(client.transport().requests()[0].1, "sk-test");
}

#[tokio::test]
async fn status_codes_map_to_error_kinds() {
    let cases = [
        (401, CompletionError::Auth { detail: None }),
        (429, CompletionError::RateLimit { detail: None }),
        (400, CompletionError::BadRequest { detail: None }),
        (
            500,
            CompletionError::ServiceUnavailable {
                status: 500,
                detail: None,
            },
        ),
        (
            502,
            CompletionError::ServiceUnavailable {
                status: 502,
                detail: None,
            },
        ),
        (
            503,
            CompletionError::ServiceUnavailable {
                status: 503,
                detail: None,
            },
        ),
        (
            404,
            CompletionError::Server {
                status: 404,
                reason: "Not Found".to_string(),
                detail: None,
            },
        ),
    ];

    for (status, expected) in cases {
        let reason = match status {
            404 => Some("Not Found".to_string()),
            _ => None,
        };
        let result = complete_with(Ok(HttpResponse {
            status,
            reason,
            body: String::new(),
        }))
        .await;
        assert_eq!(result, Err(expected), "status {status}");
    }
}

#[tokio::test]
async fn error_detail_is_extracted_from_body() {
    let result = complete_with(Ok(HttpResponse {
        status: 401,
        reason: Some("Unauthorized".to_string()),
        body: r#"{"error":{"message":"Invalid API key"}}"#.to_string(),
    }))
    .await;

    let err = result.expect_err("auth failure");
    assert_eq!(err.detail(), Some("Invalid API key"));
    assert_eq!(err.status(), Some(401));
    assert_eq!(
        err.user_message(),
        "Sorry, I had trouble connecting to the kitchen. API key is invalid or expired. Please check your config file.\n\nDetails: Invalid API key"
    );
}

#[tokio::test]
async fn malformed_error_body_is_tolerated() {
    let result = complete_with(Ok(HttpResponse {
        status: 418,
        reason: Some("I'm a teapot".to_string()),
        body: "<html>teapot</html>".to_string(),
    }))
    .await;

    let err = result.expect_err("server error");
    assert_eq!(err.detail(), None);
    assert!(err.user_message().ends_with("Server error (418): I'm a teapot"));
}

#[tokio::test]
async fn success_without_choices_is_malformed() {
    for body in [
        r#"{"choices":[]}"#,
        r#"{"id":"cmpl-1"}"#,
        r#"{"choices":[{"finish_reason":"stop"}]}"#,
        r#"{"choices":[{"message":{"content":""}}]}"#,
        "not json",
        "",
    ] {
        let result = complete_with(Ok(HttpResponse {
            status: 200,
            reason: Some("OK".to_string()),
            body: body.to_string(),
        }))
        .await;
        assert_eq!(result, Err(CompletionError::MalformedResponse), "body {body:?}");
    }
}

#[tokio::test]
async fn transport_failures_become_network_errors() {
    let result = complete_with(Err(TransportError::new(
        NetworkErrorKind::Timeout,
        "operation timed out",
    )))
    .await;

    let err = result.expect_err("timeout");
    assert!(matches!(
        err,
        CompletionError::Network {
            kind: NetworkErrorKind::Timeout,
            ..
        }
    ));
    assert_eq!(err.status(), None);
    assert_eq!(
        err.user_message(),
        "Sorry, I had trouble connecting to the kitchen. Request timed out. Please try again."
    );

    let err = complete_with(Err(TransportError::new(NetworkErrorKind::Other, "boom")))
        .await
        .expect_err("other");
    assert!(err.user_message().ends_with("Error: boom"));
}

#[test]
fn configuration_and_malformed_messages_have_no_detail_suffix() {
    assert!(CompletionError::Configuration
        .user_message()
        .starts_with("⚠️ Configuration Error"));
    assert!(!CompletionError::MalformedResponse
        .user_message()
        .contains("Details:"));
}
