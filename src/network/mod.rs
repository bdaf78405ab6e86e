//! Chain client boundary and the Aptos REST implementation

pub mod client;
pub mod aptos;
pub mod polling;

pub use client::*;
pub use aptos::*;
pub use polling::*;
