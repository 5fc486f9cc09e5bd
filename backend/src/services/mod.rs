//! Business logic services for the Nimble weather chat render service

pub mod render;

pub use render::RenderService;
