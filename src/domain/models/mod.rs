mod backend;
mod creative;
mod event;
mod generation;
mod message;
mod persona;
mod slash_commands;

pub use backend::*;
pub use creative::*;
pub use event::*;
pub use generation::*;
pub use message::*;
pub use persona::*;
pub use slash_commands::*;
