#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::domain::models::CreativeKind;
use crate::domain::models::Message;
use crate::domain::models::MessageKind;
use crate::domain::models::Sender;
use crate::domain::models::SlashCommand;
use crate::domain::models::StoreEvent;
use crate::domain::services::Conversation;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /poem (/p) [TOPIC?] - Asks Maya for a poem, optionally about TOPIC.
- /song (/s) [TOPIC?] - Asks Maya for a song, optionally about TOPIC.
- /logout (/signout) - Signs out and ends the session.
- /quit /exit (/q) - Exit Maya.
- /help (/h) - Provides this help menu.
        "#;

    return text.trim().to_string();
}

pub fn render(persona_name: &str, msg: &Message) -> String {
    let speaker = match msg.sender {
        Sender::User => Paint::cyan("You").bold().to_string(),
        Sender::Assistant => Paint::blue(persona_name).bold().to_string(),
    };

    if !msg.is_creative() {
        return format!("{speaker}: {}", msg.content);
    }

    let gift = if msg.kind == MessageKind::Song {
        "a song 🎵"
    } else {
        "a poem 💙"
    };
    return format!(
        "{speaker} wrote you {gift}\n\n{}\n",
        Paint::magenta(&msg.content)
    );
}

fn drain(persona_name: &str, rx: &mut mpsc::UnboundedReceiver<StoreEvent>) {
    while let Ok(event) = rx.try_recv() {
        if let StoreEvent::MessageAppended(msg) = event {
            // The user already sees what they typed.
            if msg.sender == Sender::Assistant {
                println!("{}\n", render(persona_name, &msg));
            }
        }
    }
}

fn prompt() -> Result<()> {
    print!("{} ", Paint::cyan(">").bold());
    std::io::stdout().flush()?;
    return Ok(());
}

/// Line oriented chat loop over stdin. Returns once the user quits, signs out
/// or closes stdin.
pub async fn start(mut conversation: Conversation, persona_name: &str) -> Result<()> {
    let mut rx = conversation.subscribe();
    for msg in conversation.store().messages() {
        println!("{}\n", render(persona_name, msg));
    }
    println!("{}\n", Paint::new("Type /help to see what else I can do.").dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        if let Some(cmd) = SlashCommand::parse(&line) {
            if cmd.is_quit() {
                break;
            }
            if cmd.is_logout() {
                println!("{}", Paint::new("Signed out. Come back soon 💙").dimmed());
                tracing::info!("Session ended by sign out");
                break;
            }
            if cmd.is_help() {
                println!("{}\n", help_text());
                continue;
            }
            if let Some(kind) = cmd.creative_kind() {
                println!("{}", Paint::new(format!("{persona_name} is writing...")).dimmed());
                let topic = cmd.topic();
                match kind {
                    CreativeKind::Poem => conversation.create_poem(topic.as_deref()).await,
                    CreativeKind::Song => conversation.create_song(topic.as_deref()).await,
                };
                drain(persona_name, &mut rx);
                continue;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        println!("{}", Paint::new(format!("{persona_name} is typing...")).dimmed());
        conversation.submit(&line).await;
        drain(persona_name, &mut rx);
    }

    return Ok(());
}
