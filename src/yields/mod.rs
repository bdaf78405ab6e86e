//! Yield sampling for tracked protocols

pub mod sampler;
pub mod named;

pub use sampler::*;
pub use named::*;
