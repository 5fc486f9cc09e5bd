//! Air quality index computation and health classification

mod breakpoints;
mod health;

pub use breakpoints::*;
pub use health::*;
