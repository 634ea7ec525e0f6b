use anyhow::Result;

use super::PersonaConfig;
use super::FALLBACK;
use super::INSTRUCTION;
use crate::domain::models::Sender;

#[test]
fn it_defaults_to_maya() {
    let persona = PersonaConfig::default();
    assert_eq!(persona.name, "Maya");
    assert!(persona.instruction.starts_with("You are Maya"));
    assert!(persona.greeting.starts_with("Hello gorgeous"));
    assert_eq!(persona.fallback, FALLBACK);
}

#[test]
fn it_names_speakers() {
    let persona = PersonaConfig::default();
    assert_eq!(persona.speaker(Sender::User), "Human");
    assert_eq!(persona.speaker(Sender::Assistant), "Maya");
}

#[tokio::test]
async fn it_loads_a_partial_persona_file() -> Result<()> {
    let persona = PersonaConfig::load("./test/persona.yaml").await?;
    assert_eq!(persona.name, "Nova");
    assert!(persona.greeting.starts_with("Hey stargazer"));
    assert_eq!(persona.instruction, INSTRUCTION);
    assert_eq!(persona.speaker(Sender::Assistant), "Nova");

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_a_missing_persona_file() {
    let res = PersonaConfig::load("./test/does-not-exist.yaml").await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_on_an_invalid_persona_file() {
    let res = PersonaConfig::load("./test/bad-persona.yaml").await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_uses_the_default_without_a_path() -> Result<()> {
    let persona = PersonaConfig::load_or_default("").await?;
    assert_eq!(persona, PersonaConfig::default());

    return Ok(());
}
