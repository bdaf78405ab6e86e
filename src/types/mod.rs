//! Core data types and structures

pub mod addresses;
pub mod yields;
pub mod allocation;
pub mod execution;
pub mod oracle;

pub use addresses::*;
pub use yields::*;
pub use allocation::*;
pub use execution::*;
pub use oracle::*;
