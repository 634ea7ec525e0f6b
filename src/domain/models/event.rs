use super::Message;

/// Emitted by the conversation store after every state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    MessageAppended(Message),
    GeneratingChanged(bool),
}
