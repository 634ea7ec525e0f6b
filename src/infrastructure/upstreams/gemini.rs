#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Upstream;

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const BLOCK_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> GenerationConfig {
        return GenerationConfig {
            temperature: 0.9,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl CompletionRequest {
    fn new(prompt: &str) -> CompletionRequest {
        return CompletionRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig::default(),
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|category| {
                    return SafetySetting {
                        category: category.to_string(),
                        threshold: BLOCK_THRESHOLD.to_string(),
                    };
                })
                .collect(),
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl CompletionResponse {
    /// Text of the first part of the first candidate, if it has any.
    fn first_text(self) -> Option<String> {
        return self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| return candidate.content)
            .and_then(|content| return content.parts.into_iter().next())
            .and_then(|part| return part.text)
            .filter(|text| return !text.trim().is_empty());
    }
}

fn is_transient(status: StatusCode) -> bool {
    return status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
}

pub struct Gemini {
    url: String,
    model: String,
    timeout: Duration,
    retries: u64,
}

impl Gemini {
    pub fn new(url: &str, model: &str, timeout: Duration, retries: u64) -> Gemini {
        return Gemini {
            url: url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
            retries,
        };
    }

    pub fn from_config() -> Result<Gemini> {
        let url = Config::get(ConfigKey::GeminiURL);
        if url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        let model = Config::get(ConfigKey::Model);
        if model.is_empty() {
            bail!("Gemini model is not defined");
        }

        return Ok(Gemini::new(
            &url,
            &model,
            Duration::from_millis(Config::get_u64(ConfigKey::UpstreamTimeout)?),
            Config::get_u64(ConfigKey::UpstreamRetries)?,
        ));
    }
}

#[async_trait]
impl Upstream for Gemini {
    #[allow(clippy::implicit_return)]
    async fn generate(&self, credential: &str, prompt: &str) -> Result<Option<String>> {
        let req = CompletionRequest::new(prompt);
        let client = reqwest::Client::new();

        let mut attempt = 0;
        loop {
            attempt += 1;
            let can_retry = attempt <= self.retries;

            let res = client
                .post(format!(
                    "{url}/v1beta/models/{model}:generateContent",
                    url = self.url,
                    model = self.model,
                ))
                .query(&[("key", credential)])
                .timeout(self.timeout)
                .json(&req)
                .send()
                .await;

            let res = match res {
                Ok(res) => res,
                Err(err) => {
                    tracing::warn!(error = ?err.without_url(), attempt, "Gemini is not reachable");
                    if can_retry {
                        continue;
                    }
                    bail!("Gemini is not reachable");
                }
            };

            let status = res.status();
            if !status.is_success() {
                tracing::warn!(
                    status = status.as_u16(),
                    attempt,
                    "Failed to make completion request to Gemini"
                );
                if can_retry && is_transient(status) {
                    continue;
                }
                bail!(format!(
                    "Failed to make completion request to Gemini, {}",
                    status.as_u16()
                ));
            }

            return match res.json::<CompletionResponse>().await {
                Ok(completion) => Ok(completion.first_text()),
                Err(err) => {
                    tracing::warn!(error = ?err.without_url(), "Gemini returned an unreadable completion");
                    Ok(None)
                }
            };
        }
    }
}
