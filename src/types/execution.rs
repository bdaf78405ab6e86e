//! Rebalance execution types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use super::AllocationEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceResult {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub transaction_hash: String,
    pub new_allocations: Vec<AllocationEntry>,
    pub gas_cost: Decimal,
    pub estimated_yield_improvement: f64,
    pub outcome: RebalanceOutcome,
}

impl RebalanceResult {
    pub fn is_synthetic(&self) -> bool {
        matches!(self.outcome, RebalanceOutcome::Synthetic { .. })
    }
}

/// Whether the chain actually confirmed the rebalance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RebalanceOutcome {
    Confirmed { gas_used: u64 },
    /// Fabricated locally after the chain call failed; the hash does not exist on-chain.
    Synthetic { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    Pending,
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub hash: String,
    pub status: TransactionState,
    pub gas_used: Option<u64>,
    pub timestamp: DateTime<Utc>,
}
