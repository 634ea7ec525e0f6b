#[cfg(test)]
#[path = "conversation_store_test.rs"]
mod tests;

use tokio::sync::mpsc;

use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::StoreEvent;

/// Owns the transcript of one chat session and the flag gating new requests.
/// The transcript is append only and is never empty.
pub struct ConversationStore {
    messages: Vec<Message>,
    generating: bool,
    listeners: Vec<mpsc::UnboundedSender<StoreEvent>>,
}

impl ConversationStore {
    pub fn new(greeting: &str) -> ConversationStore {
        return ConversationStore {
            messages: vec![Message::new(Sender::Assistant, greeting)],
            generating: false,
            listeners: vec![],
        };
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_generating(&self) -> bool {
        return self.generating;
    }

    pub fn append(&mut self, message: Message) {
        tracing::debug!(
            id = %message.id,
            sender = ?message.sender,
            kind = ?message.kind,
            "append message"
        );
        self.messages.push(message.clone());
        self.emit(StoreEvent::MessageAppended(message));
    }

    pub fn set_generating(&mut self, generating: bool) {
        self.generating = generating;
        self.emit(StoreEvent::GeneratingChanged(generating));
    }

    /// Every later change is delivered to the returned receiver. Dropping the
    /// receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StoreEvent> {
        let (tx, rx) = mpsc::unbounded_channel::<StoreEvent>();
        self.listeners.push(tx);
        return rx;
    }

    fn emit(&mut self, event: StoreEvent) {
        self.listeners.retain(|listener| {
            return listener.send(event.clone()).is_ok();
        });
    }
}
