pub mod content_library;
pub mod context_window;
mod conversation;
mod conversation_store;
mod proxy;

pub use conversation::*;
pub use conversation_store::*;
pub use proxy::*;
