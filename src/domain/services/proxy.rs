#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_json::json;

use super::context_window::window;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Message;
use crate::domain::models::PersonaConfig;
use crate::domain::models::Sender;
use crate::domain::models::CONTEXT_WINDOW_SIZE;
use crate::infrastructure::upstreams::UpstreamBox;

pub const CORS_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "authorization, x-client-info, apikey, content-type",
    ),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ProxyResponse {
    fn preflight() -> ProxyResponse {
        return ProxyResponse {
            status: 200,
            content_type: "text/plain",
            body: "ok".to_string(),
        };
    }

    fn reply(text: &str) -> ProxyResponse {
        return ProxyResponse {
            status: 200,
            content_type: "application/json",
            body: json!({ "response": text }).to_string(),
        };
    }

    fn error(status: u16, message: &str) -> ProxyResponse {
        return ProxyResponse {
            status,
            content_type: "application/json",
            body: json!({ "error": message }).to_string(),
        };
    }

    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        let mut headers = CORS_HEADERS.to_vec();
        headers.push(("Content-Type", self.content_type));
        return headers;
    }
}

/// A history entry as clients post it. Only the speaker and the text matter
/// here, everything else a client attaches is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryTurn {
    #[serde(deserialize_with = "null_as_empty")]
    pub sender: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
    return Ok(value.unwrap_or_default());
}

impl HistoryTurn {
    /// Anything that isn't `user` was said by the persona.
    pub fn role(&self) -> Sender {
        if self.sender == "user" {
            return Sender::User;
        }

        return Sender::Assistant;
    }
}

impl From<&Message> for HistoryTurn {
    fn from(msg: &Message) -> HistoryTurn {
        let sender = match msg.sender {
            Sender::User => "user",
            Sender::Assistant => "ai",
        };

        return HistoryTurn {
            sender: sender.to_string(),
            content: msg.content.to_string(),
        };
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ProxyRequest {
    message: String,
    #[serde(rename = "conversationHistory", default)]
    history: Option<Vec<HistoryTurn>>,
}

/// Everything the proxy needs, read once at startup.
#[derive(Clone, Debug, Default)]
pub struct ProxySettings {
    pub credential: Option<String>,
    pub persona: PersonaConfig,
}

impl ProxySettings {
    pub async fn load() -> Result<ProxySettings> {
        let token = Config::get(ConfigKey::GeminiToken);
        let credential = if token.trim().is_empty() {
            tracing::warn!("No Gemini API key configured, every generation request will be refused");
            None
        } else {
            Some(token)
        };

        let persona = PersonaConfig::load_or_default(&Config::get(ConfigKey::PersonaFile)).await?;

        return Ok(ProxySettings {
            credential,
            persona,
        });
    }
}

/// Stateless request handler sitting between chat clients and the model.
/// Attaches the persona, linearizes the conversation and makes sure clients
/// only ever see a reply or a short error.
pub struct ProxyService {
    settings: ProxySettings,
    upstream: UpstreamBox,
}

impl ProxyService {
    pub fn new(settings: ProxySettings, upstream: UpstreamBox) -> ProxyService {
        return ProxyService { settings, upstream };
    }

    pub fn build_prompt(&self, message: &str, history: &[HistoryTurn]) -> String {
        let persona = &self.settings.persona;
        let transcript = window(history, CONTEXT_WINDOW_SIZE)
            .iter()
            .map(|turn| {
                return format!("{}: {}", persona.speaker(turn.role()), turn.content);
            })
            .collect::<Vec<String>>()
            .join("\n");

        return format!(
            "{instruction}\n\nConversation history:\n{transcript}\n\n{human}: {message}\n{name}:",
            instruction = persona.instruction,
            human = persona.speaker(Sender::User),
            name = persona.name,
        );
    }

    pub async fn handle(&self, method: &str, body: &[u8]) -> ProxyResponse {
        tracing::info!(method, "Proxy request received");

        if method.eq_ignore_ascii_case("OPTIONS") {
            return ProxyResponse::preflight();
        }

        let credential = match &self.settings.credential {
            Some(credential) => credential,
            None => {
                tracing::error!("No API key found");
                return ProxyResponse::error(500, "API key not configured");
            }
        };

        let req = match serde_json::from_slice::<ProxyRequest>(body) {
            Ok(req) => req,
            Err(err) => {
                tracing::warn!(error = %err, "Rejected request body");
                return ProxyResponse::error(400, "Invalid request body");
            }
        };

        let history = req.history.unwrap_or_default();
        tracing::debug!(
            message_len = req.message.len(),
            history_len = history.len(),
            "Calling upstream model"
        );

        let prompt = self.build_prompt(&req.message, &history);
        match self.upstream.generate(credential, &prompt).await {
            Ok(Some(text)) => {
                tracing::info!(response_len = text.len(), "Sending response");
                return ProxyResponse::reply(&text);
            }
            Ok(None) => {
                tracing::warn!("Upstream returned no usable candidate, substituting fallback");
                return ProxyResponse::reply(&self.settings.persona.fallback);
            }
            Err(err) => {
                tracing::error!(error = %err, "Upstream model call failed");
                return ProxyResponse::error(500, "Failed to get AI response");
            }
        }
    }
}
