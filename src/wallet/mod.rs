//! Demo wallet: local accounts and the connected-account session

pub mod account;
pub mod session;

pub use account::*;
pub use session::*;
