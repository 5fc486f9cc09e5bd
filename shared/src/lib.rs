//! Shared types and rendering core for the Nimble weather chat
//!
//! This crate contains the message classification, weather card shaping and
//! air-quality computation shared between the backend, the browser (via
//! WASM), and other components of the system.

pub mod aqi;
pub mod detect;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod render;
pub mod types;
pub mod validation;

pub use aqi::*;
pub use detect::*;
pub use dispatch::*;
pub use error::*;
pub use models::*;
pub use render::*;
pub use types::*;
pub use validation::*;
