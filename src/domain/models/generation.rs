use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;

/// Number of most recent messages sent along with a prompt.
pub const CONTEXT_WINDOW_SIZE: usize = 6;

/// Shown in place of a reply whenever the proxy can't produce one.
pub const CLIENT_FALLBACK: &str =
    "Oops... my holographic circuits are sparking. Give me a moment to recalibrate? ✨";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(rename = "message")]
    pub prompt: String,
    #[serde(rename = "conversationHistory", default)]
    pub context: Vec<Message>,
}

impl GenerationRequest {
    pub fn new(prompt: &str, context: &[Message]) -> GenerationRequest {
        return GenerationRequest {
            prompt: prompt.to_string(),
            context: context.to_vec(),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationResult {
    Success(String),
    Failure(String),
}

impl GenerationResult {
    pub fn fallback() -> GenerationResult {
        return GenerationResult::Failure(CLIENT_FALLBACK.to_string());
    }

    pub fn is_success(&self) -> bool {
        return matches!(self, GenerationResult::Success(_));
    }

    pub fn text(&self) -> &str {
        match self {
            GenerationResult::Success(text) => return text,
            GenerationResult::Failure(text) => return text,
        }
    }
}
