//! Agent service facade over the wallet, yields, allocation and execution layers

pub mod service;

pub use service::*;
