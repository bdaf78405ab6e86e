//! Portfolio allocation types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use super::RiskTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub protocol: String,
    pub percentage: f64,
    pub amount: Decimal,
    pub risk: RiskTier,
}

/// Dry-run estimate of a rebalance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceSimulation {
    pub estimated_gas: Decimal,
    pub estimated_yield: f64,
    pub risk_score: f64,
}
