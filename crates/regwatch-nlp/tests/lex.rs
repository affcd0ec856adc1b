//! Integration tests for `LexClient` and `ask_bot` using wiremock HTTP mocks.

use regwatch_nlp::{ask_bot, BotError, ConversationalBot, LexClient, LexSession};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PATH: &str = "/bots/BOT123/botAliases/ALIAS9/botLocales/en_US/sessions/test_session/text";

fn test_client(base_url: &str) -> LexClient {
    let session = LexSession {
        bot_id: "BOT123".to_string(),
        bot_alias_id: "ALIAS9".to_string(),
        locale_id: "en_US".to_string(),
        session_id: "test_session".to_string(),
    };
    LexClient::new(base_url, session, 30, "regwatch-test")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn recognize_text_returns_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_json(json!({"text": "What changed at the FCA?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"content": "The FCA updated its Consumer Duty guidance.", "contentType": "PlainText"},
                {"content": "Anything else?", "contentType": "PlainText"}
            ],
            "sessionId": "test_session"
        })))
        .mount(&server)
        .await;

    let messages = test_client(&server.uri())
        .recognize_text("What changed at the FCA?")
        .await
        .expect("should parse messages");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content.as_deref(), Some("Anything else?"));
}

#[tokio::test]
async fn ask_bot_returns_first_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"content": "Margin rules apply from June.", "contentType": "PlainText"}]
        })))
        .mount(&server)
        .await;

    let reply = ask_bot(&test_client(&server.uri()), "When do margin rules apply?").await;
    assert_eq!(reply, "Margin rules apply from June.");
}

#[tokio::test]
async fn reply_without_messages_is_error_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sessionId": "test_session"})))
        .mount(&server)
        .await;

    let reply = ask_bot(&test_client(&server.uri()), "hello").await;
    assert_eq!(reply, "Error: bot returned no messages");
}

#[tokio::test]
async fn service_error_uses_error_type_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-amzn-ErrorType", "ResourceNotFoundException:http://internal/")
                .set_body_json(json!({"message": "bot not found"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.recognize_text("hello").await.unwrap_err();
    assert!(matches!(
        err,
        BotError::Service { ref code, ref message }
            if code == "ResourceNotFoundException" && message == "bot not found"
    ));

    let reply = ask_bot(&client, "hello").await;
    assert!(reply.starts_with("Error: "));
    assert!(reply.contains("bot not found"));
}
