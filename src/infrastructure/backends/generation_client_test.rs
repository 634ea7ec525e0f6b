use std::time::Duration;
use std::time::Instant;

use anyhow::Result;

use mockito::Matcher;
use serde_json::json;
use test_utils::silent_server;

use super::GenerationClient;
use crate::domain::models::Backend;
use crate::domain::models::GenerationResult;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::CLIENT_FALLBACK;

impl GenerationClient {
    fn with_url(url: String) -> GenerationClient {
        return GenerationClient {
            url: format!("{url}/generate"),
            api_key: "".to_string(),
            timeout: Duration::from_millis(500),
        };
    }
}

fn context() -> Vec<Message> {
    return vec![
        Message::new(Sender::Assistant, "Hello gorgeous"),
        Message::new(Sender::User, "hi"),
    ];
}

#[tokio::test]
async fn it_returns_the_response_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(r#"{ "response": "  Hey you... missed me? 😏\n" }"#)
        .create_async()
        .await;

    let client = GenerationClient::with_url(server.url());
    let res = client.send("hi", &context()).await;
    mock.assert_async().await;

    assert_eq!(
        res,
        GenerationResult::Success("  Hey you... missed me? 😏\n".to_string())
    );
}

#[tokio::test]
async fn it_posts_the_message_and_history() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .match_body(Matcher::PartialJson(json!({
            "message": "hi",
            "conversationHistory": [
                { "sender": "ai", "content": "Hello gorgeous", "type": "message" },
                { "sender": "user", "content": "hi", "type": "message" }
            ]
        })))
        .with_status(200)
        .with_body(r#"{ "response": "hello" }"#)
        .create_async()
        .await;

    let client = GenerationClient::with_url(server.url());
    let res = client.send("hi", &context()).await;
    mock.assert_async().await;

    assert!(res.is_success());
}

#[tokio::test]
async fn it_attaches_the_api_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .match_header("authorization", "Bearer anon-key")
        .match_header("apikey", "anon-key")
        .with_status(200)
        .with_body(r#"{ "response": "hello" }"#)
        .create_async()
        .await;

    let mut client = GenerationClient::with_url(server.url());
    client.api_key = "anon-key".to_string();
    let res = client.send("hi", &[]).await;
    mock.assert_async().await;

    assert!(res.is_success());
}

#[tokio::test]
async fn it_falls_back_on_server_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .with_status(500)
        .with_body(r#"{ "error": "Failed to get AI response" }"#)
        .create_async()
        .await;

    let client = GenerationClient::with_url(server.url());
    let res = client.send("hi", &context()).await;
    mock.assert_async().await;

    assert_eq!(res, GenerationResult::Failure(CLIENT_FALLBACK.to_string()));
}

#[tokio::test]
async fn it_falls_back_on_missing_responses() {
    for body in [r#"{}"#, r#"{ "response": "" }"#, r#"{ "response": null }"#, "nope"] {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = GenerationClient::with_url(server.url());
        let res = client.send("hi", &context()).await;
        mock.assert_async().await;

        assert_eq!(res.text(), CLIENT_FALLBACK, "body: {body}");
        assert!(!res.is_success());
    }
}

#[tokio::test]
async fn it_falls_back_when_unreachable() {
    let client = GenerationClient::with_url("http://127.0.0.1:9".to_string());
    let res = client.send("hi", &context()).await;

    assert_eq!(res, GenerationResult::fallback());
}

#[tokio::test]
async fn it_falls_back_when_the_proxy_hangs() -> Result<()> {
    let (url, _) = silent_server().await?;
    let client = GenerationClient::with_url(url);

    let started = Instant::now();
    let res = client.send("hi", &context()).await;
    let elapsed = started.elapsed();

    assert_eq!(res, GenerationResult::fallback());
    assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "{elapsed:?}");

    return Ok(());
}
