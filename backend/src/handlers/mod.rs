//! HTTP handlers for the Nimble weather chat render service

pub mod aqi;
pub mod health;
pub mod messages;

pub use aqi::*;
pub use health::*;
pub use messages::*;
