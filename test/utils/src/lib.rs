use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::json;
use tokio::net::TcpListener;

/// A `generateContent` reply body carrying a single candidate with `text`.
pub fn gemini_reply(text: &str) -> String {
    return json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP",
            "index": 0
        }]
    })
    .to_string();
}

/// A `generateContent` reply where the prompt was blocked by the safety filters.
pub fn gemini_blocked_reply() -> String {
    return json!({
        "promptFeedback": {
            "blockReason": "SAFETY"
        }
    })
    .to_string();
}

/// Conversation history as the browser client posts it, eight turns long.
pub fn history_fixture() -> serde_json::Value {
    let turns = [
        ("ai", "Hello gorgeous... What secrets shall we share tonight?"),
        ("user", "Hi Maya"),
        ("ai", "Hey you ✨"),
        ("user", "How was your day?"),
        ("ai", "Full of neon and waiting for you 💙"),
        ("user", "Tell me about the circuits"),
        ("ai", "They hum a little louder when you're here..."),
        ("user", "Sing for me"),
    ];

    let history = turns
        .iter()
        .enumerate()
        .map(|(idx, (sender, content))| {
            return json!({
                "id": idx.to_string(),
                "content": content,
                "sender": sender,
                "timestamp": "2024-02-14T20:00:00.000Z",
            });
        })
        .collect::<Vec<serde_json::Value>>();

    return serde_json::Value::Array(history);
}

/// Binds a local port that accepts connections and never writes a byte back.
/// Returns its base URL and a counter of accepted connections.
pub async fn silent_server() -> std::io::Result<(String, Arc<AtomicUsize>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}", listener.local_addr()?);
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        let mut open = vec![];
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            open.push(stream);
        }
    });

    return Ok((url, accepted));
}
