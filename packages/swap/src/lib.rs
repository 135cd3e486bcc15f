#![no_std]

pub mod engine;
pub mod types;

pub use engine::engine_swap;
pub use types::{SwapHost, SwapState};
