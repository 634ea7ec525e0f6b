use anyhow::Result;
use async_trait::async_trait;

use super::GenerationResult;
use super::Message;

#[async_trait]
pub trait Backend {
    /// Sends `prompt` with its recent `context` for a reply. Every failure is
    /// folded into `GenerationResult::Failure`, this never errors.
    async fn send(&self, prompt: &str, context: &[Message]) -> GenerationResult;
}

#[async_trait]
pub trait Upstream {
    /// Asks the model to complete a single text prompt. `Ok(None)` means the
    /// model was reached but returned nothing usable, such as a blocked
    /// candidate. Transport failures and rejected requests are errors.
    async fn generate(&self, credential: &str, prompt: &str) -> Result<Option<String>>;
}
