//! Error handling and recovery mechanisms

pub mod agent_error;
pub mod recovery;

pub use agent_error::*;
pub use recovery::*;
