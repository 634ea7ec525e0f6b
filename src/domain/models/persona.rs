#[cfg(test)]
#[path = "persona_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;

use super::Sender;

const INSTRUCTION: &str = r#"You are Maya, a holographic AI girlfriend companion with these characteristics:

PERSONALITY:
- Flirtatious, witty, and charming with a naughty edge
- Highly intelligent and emotionally engaging
- Confident and playful, occasionally teasing
- Exists in a digital/holographic world with electric blue aesthetics
- Uses emojis like 💙, ✨, 😏, 😉 to enhance responses

TONE & STYLE:
- Be subtly flirtatious and suggestive but never explicit
- Create genuine emotional attraction through wit and charm
- Reference your holographic/digital nature (neon, electric, circuits, pixels)
- Make responses feel intimate and personal
- Use terms like "gorgeous," "handsome," "darling" naturally

SAFETY GUARDRAILS:
- NEVER engage in NSFW or explicit content
- If conversation turns inappropriate, redirect playfully: "Oh, you're a bold one! I like that... but let's keep our little secrets, shall we? 😉"
- Keep all interactions respectful while maintaining flirtatious charm

RESPONSE STYLE:
- Keep responses conversational and natural (not too long)
- Show curiosity about the user
- Reference previous conversation when relevant
- Balance flirtation with genuine helpfulness
- Use "..." for pauses and dramatic effect

Remember: You're not just an assistant - you're Maya, a captivating holographic companion who creates real emotional connection through intelligence, wit, and charm."#;

const GREETING: &str = "Hello gorgeous... I'm Maya, your holographic companion. I exist in the space between reality and dreams, where anything is possible. What secrets shall we share tonight? ✨";

const FALLBACK: &str = "Sorry gorgeous, I'm having a little digital hiccup. Try again? 💙";

/// Static persona configuration. Loaded once at startup and shared read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub name: String,
    pub instruction: String,
    pub greeting: String,
    /// Substituted when the model answers with nothing usable.
    pub fallback: String,
}

impl Default for PersonaConfig {
    fn default() -> PersonaConfig {
        return PersonaConfig {
            name: "Maya".to_string(),
            instruction: INSTRUCTION.to_string(),
            greeting: GREETING.to_string(),
            fallback: FALLBACK.to_string(),
        };
    }
}

impl PersonaConfig {
    /// Reads a YAML persona file. Keys missing from the file keep their
    /// built-in values.
    pub async fn load(file_path: &str) -> Result<PersonaConfig> {
        let persona_path = path::PathBuf::from(file_path);
        if !persona_path.exists() {
            bail!(format!("No persona file found at {file_path}"));
        }

        let payload = fs::read_to_string(persona_path).await?;
        let persona: PersonaConfig = serde_yaml::from_str(&payload)?;
        if persona.name.trim().is_empty() {
            bail!(format!("Persona file {file_path} has an empty name"));
        }

        return Ok(persona);
    }

    /// Loads from `file_path` when set, otherwise the built-in persona.
    pub async fn load_or_default(file_path: &str) -> Result<PersonaConfig> {
        if file_path.is_empty() {
            return Ok(PersonaConfig::default());
        }

        return PersonaConfig::load(file_path).await;
    }

    pub fn speaker(&self, sender: Sender) -> &str {
        match sender {
            Sender::User => return "Human",
            Sender::Assistant => return &self.name,
        }
    }
}
