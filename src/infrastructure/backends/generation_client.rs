#[cfg(test)]
#[path = "generation_client_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::GenerationRequest;
use crate::domain::models::GenerationResult;
use crate::domain::models::Message;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ProxyReply {
    #[serde(default)]
    response: Option<String>,
}

/// Talks to the proxy service. Whatever goes wrong on the way, the caller gets
/// the same fallback line back.
pub struct GenerationClient {
    url: String,
    api_key: String,
    timeout: Duration,
}

impl GenerationClient {
    pub fn from_config() -> Result<GenerationClient> {
        let url = Config::get(ConfigKey::ProxyURL);
        if url.is_empty() {
            bail!("Proxy URL is not defined");
        }

        return Ok(GenerationClient {
            url,
            api_key: Config::get(ConfigKey::ProxyApiKey),
            timeout: Duration::from_millis(Config::get_u64(ConfigKey::RequestTimeout)?),
        });
    }

    async fn request(&self, req: &GenerationRequest) -> Result<String> {
        let mut builder = reqwest::Client::new()
            .post(&self.url)
            .timeout(self.timeout)
            .json(req);
        if !self.api_key.is_empty() {
            builder = builder
                .bearer_auth(&self.api_key)
                .header("apikey", &self.api_key);
        }

        let res = builder.send().await?;
        if !res.status().is_success() {
            bail!(format!(
                "Proxy responded with status {}",
                res.status().as_u16()
            ));
        }

        let reply = res.json::<ProxyReply>().await?;
        match reply.response {
            Some(text) if !text.trim().is_empty() => return Ok(text),
            _ => bail!("Proxy responded without a response"),
        }
    }
}

#[async_trait]
impl Backend for GenerationClient {
    #[allow(clippy::implicit_return)]
    async fn send(&self, prompt: &str, context: &[Message]) -> GenerationResult {
        let req = GenerationRequest::new(prompt, context);
        tracing::debug!(context_len = req.context.len(), "Sending generation request");

        match self.request(&req).await {
            Ok(text) => return GenerationResult::Success(text),
            Err(err) => {
                tracing::warn!(error = %err, "Generation failed, using fallback");
                return GenerationResult::fallback();
            }
        }
    }
}
