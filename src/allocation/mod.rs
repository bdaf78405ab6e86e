//! Portfolio allocation scoring

pub mod optimizer;

pub use optimizer::*;
