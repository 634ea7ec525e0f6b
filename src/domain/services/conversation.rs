#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use tokio::sync::mpsc;

use super::context_window::window;
use super::content_library::CreativePicker;
use super::conversation_store::ConversationStore;
use crate::domain::models::CreativeKind;
use crate::domain::models::CreativeMode;
use crate::domain::models::GenerationResult;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::StoreEvent;
use crate::domain::models::CONTEXT_WINDOW_SIZE;
use crate::infrastructure::backends::BackendBox;

/// One chat session. Binds the store to a generation backend and the local
/// poem and song collection. None of the actions return errors, failures end
/// up in the transcript as fallback replies.
pub struct Conversation {
    store: ConversationStore,
    backend: BackendBox,
    picker: CreativePicker,
    mode: CreativeMode,
}

impl Conversation {
    pub fn new(greeting: &str, backend: BackendBox, mode: CreativeMode) -> Conversation {
        return Conversation {
            store: ConversationStore::new(greeting),
            backend,
            picker: CreativePicker::default(),
            mode,
        };
    }

    pub fn store(&self) -> &ConversationStore {
        return &self.store;
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StoreEvent> {
        return self.store.subscribe();
    }

    /// Sends a user utterance. Returns false without touching the transcript
    /// when the text is blank or a reply is still pending.
    pub async fn submit(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.store.is_generating() {
            return false;
        }

        self.store.append(Message::new(Sender::User, text));
        self.store.set_generating(true);

        let context = window(self.store.messages(), CONTEXT_WINDOW_SIZE).to_vec();
        tracing::debug!(
            log_len = self.store.len(),
            context_len = context.len(),
            "Submitting message"
        );
        let res = self.backend.send(text, &context).await;
        if !res.is_success() {
            tracing::warn!("Reply replaced with fallback");
        }

        self.store.append(Message::new(Sender::Assistant, res.text()));
        self.store.set_generating(false);

        return true;
    }

    pub async fn create_poem(&mut self, topic: Option<&str>) -> bool {
        return self.create(CreativeKind::Poem, topic).await;
    }

    pub async fn create_song(&mut self, topic: Option<&str>) -> bool {
        return self.create(CreativeKind::Song, topic).await;
    }

    /// Adds a poem or song from the assistant. Remote mode asks the backend
    /// without any context and falls back to the local collection.
    pub async fn create(&mut self, kind: CreativeKind, topic: Option<&str>) -> bool {
        if self.store.is_generating() {
            return false;
        }
        self.store.set_generating(true);

        let content = match self.mode {
            CreativeMode::Local => self.picker.pick(kind).to_string(),
            CreativeMode::Remote => match self.backend.send(&kind.prompt(topic), &[]).await {
                GenerationResult::Success(text) => text,
                GenerationResult::Failure(_) => {
                    tracing::warn!(%kind, "Creative request failed, using local collection");
                    self.picker.pick(kind).to_string()
                }
            },
        };

        self.store.append(Message::new_with_kind(
            Sender::Assistant,
            kind.message_kind(),
            &content,
        ));
        self.store.set_generating(false);

        return true;
    }
}
