//! Domain models for the Nimble weather chat

mod message;
mod view;
mod weather;

pub use message::*;
pub use view::*;
pub use weather::*;
