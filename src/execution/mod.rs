//! Rebalance execution engine and synthetic fallbacks

pub mod engine;
pub mod simulation;

pub use engine::*;
pub use simulation::*;
