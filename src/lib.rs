//! Yield Prophet Agent - yield sampling and portfolio rebalancing on Aptos testnet
//! 
//! The agent samples yields for a fixed set of Aptos DeFi protocols, scores them
//! into a risk-weighted allocation, and submits the allocation as a rebalance
//! transaction from a demo wallet. Failed submissions come back as clearly
//! labelled synthetic results.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod wallet;
pub mod yields;
pub mod allocation;
pub mod execution;
pub mod oracle;
pub mod agent;
pub mod utils;
pub mod storage;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{AgentError, AgentResult};
pub use agent::YieldProphetAgent;
pub use types::*;
