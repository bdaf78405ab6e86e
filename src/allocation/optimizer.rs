//! Risk-weighted allocation across protocols

use rust_decimal::prelude::*;
use tracing::debug;
use crate::{
    errors::{AgentError, AgentResult},
    types::{AllocationEntry, ProtocolYield},
};

/// Percentages from one run sum to 100 within this tolerance. No
/// renormalization pass is applied.
pub const PERCENTAGE_TOLERANCE: f64 = 0.01;

/// Split `portfolio_total` across `yields` in proportion to
/// `apy * risk multiplier` (Low 1.2, Medium 1.0, High 0.8).
pub fn optimize(yields: &[ProtocolYield], portfolio_total: Decimal) -> AgentResult<Vec<AllocationEntry>> {
    if yields.is_empty() {
        return Err(AgentError::InvalidInput(
            "cannot allocate across an empty yield set".to_string(),
        ));
    }

    let scores: Vec<f64> = yields.iter().map(ProtocolYield::score).collect();
    let total_score: f64 = scores.iter().sum();

    if !total_score.is_finite() || total_score <= 0.0 {
        return Err(AgentError::InvalidInput(format!(
            "total allocation score must be positive, got {}",
            total_score
        )));
    }

    debug!("Allocating {} across {} protocols (total score {:.4})", portfolio_total, yields.len(), total_score);

    yields
        .iter()
        .zip(scores)
        .map(|(protocol_yield, score)| {
            let share = score / total_score;
            let share_decimal = Decimal::from_f64(share).ok_or_else(|| {
                AgentError::InvalidInput(format!("non-finite share for {}", protocol_yield.protocol))
            })?;

            Ok(AllocationEntry {
                protocol: protocol_yield.protocol.clone(),
                percentage: share * 100.0,
                amount: portfolio_total * share_decimal,
                risk: protocol_yield.risk,
            })
        })
        .collect()
}

/// Weighted portfolio risk: Low 1, Medium 2, High 3, weighted by percentage.
pub fn portfolio_risk_score(allocations: &[AllocationEntry]) -> f64 {
    allocations
        .iter()
        .map(|a| a.percentage * a.risk.weight())
        .sum::<f64>()
        / 100.0
}
