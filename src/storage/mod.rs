//! Client-local state persistence

pub mod wallet_store;

pub use wallet_store::*;
