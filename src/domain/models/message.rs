#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai", alias = "assistant")]
    Assistant,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    #[default]
    #[serde(rename = "message")]
    Plain,
    #[serde(rename = "poem")]
    Poem,
    #[serde(rename = "song")]
    Song,
}

/// A single chat transcript entry. Entries are never edited once created, the
/// `id` is the identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default = "Message::create_id")]
    pub id: String,
    pub content: String,
    pub sender: Sender,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

impl Message {
    pub fn new(sender: Sender, content: &str) -> Message {
        return Message::new_with_kind(sender, MessageKind::Plain, content);
    }

    pub fn new_with_kind(sender: Sender, kind: MessageKind, content: &str) -> Message {
        return Message {
            id: Message::create_id(),
            content: content.to_string(),
            sender,
            timestamp: Utc::now(),
            kind,
        };
    }

    pub fn create_id() -> String {
        return Uuid::new_v4().to_string();
    }

    pub fn is_creative(&self) -> bool {
        return self.kind != MessageKind::Plain;
    }
}
