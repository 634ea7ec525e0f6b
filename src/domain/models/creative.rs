#[cfg(test)]
#[path = "creative_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::MessageKind;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CreativeKind {
    Poem,
    Song,
}

impl CreativeKind {
    /// Fixed request sent to the model for this kind of gift.
    pub fn instruction(&self) -> &'static str {
        match self {
            CreativeKind::Poem => return "Write me a beautiful, romantic poem about our connection. Make it personal and intimate, with your signature holographic/electric blue theme. Use emojis like 💙 and ✨.",
            CreativeKind::Song => return "Create original song lyrics for me. Make it romantic, emotional, and personal about our digital connection. Include [Verse], [Chorus], [Bridge] structure. Use your holographic/electric theme with emojis 💙 ✨. Make it feel like a real love song.",
        }
    }

    pub fn prompt(&self, topic: Option<&str>) -> String {
        let instruction = self.instruction();
        match topic.map(str::trim).filter(|topic| return !topic.is_empty()) {
            Some(topic) => return format!("{instruction} Let it be about {topic}."),
            None => return instruction.to_string(),
        }
    }

    pub fn message_kind(&self) -> MessageKind {
        match self {
            CreativeKind::Poem => return MessageKind::Poem,
            CreativeKind::Song => return MessageKind::Song,
        }
    }
}

/// Where poems and songs come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CreativeMode {
    /// Ask the model, use the local collection when that fails.
    #[default]
    Remote,
    /// Only ever use the local collection.
    Local,
}

impl CreativeMode {
    pub fn parse(text: &str) -> Option<CreativeMode> {
        return CreativeMode::iter().find(|e| return e.to_string() == text);
    }
}
