//! Crystal-ball predictions and market snapshot simulation

pub mod fixtures;
pub mod prophecy;

pub use fixtures::*;
pub use prophecy::*;
