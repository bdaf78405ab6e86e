//! Display and printing utilities

use std::collections::HashMap;
use std::time::Instant;
use rust_decimal::Decimal;
use tracing::{info, warn};
use crate::types::{
    AllocationEntry, ConfidenceBand, Prophecy, ProtocolSnapshot, RebalanceOutcome, RebalanceResult,
    RebalanceSimulation, TransactionStatus, YieldSource,
};

pub fn print_session_stats(
    start_time: Instant,
    refresh_cycles: u64,
    total_rebalances: u64,
    synthetic_rebalances: u64,
    total_gas_cost: Decimal,
    error_counts: &HashMap<String, u32>,
) {
    let runtime = start_time.elapsed().as_secs() / 60;

    info!("\n📊 Session Statistics ({} minutes)", runtime);
    info!("   🔮 YIELDS:");
    info!("     Refresh cycles: {}", refresh_cycles);

    info!("   🚀 REBALANCING:");
    info!("     Total rebalances: {}", total_rebalances);
    info!("     Confirmed on-chain: {}", total_rebalances.saturating_sub(synthetic_rebalances));
    info!("     Synthetic: {}", synthetic_rebalances);
    info!("     Gas spent: {} APT", total_gas_cost);

    if !error_counts.is_empty() {
        info!("   ⚙️  SYSTEM:");
        info!("     Error summary:");
        for (error_type, count) in error_counts.iter() {
            info!("       {}: {}", error_type, count);
        }
    }

    info!("");
}

pub fn print_market_snapshot(snapshot: &[ProtocolSnapshot], sources: &[YieldSource]) {
    info!("\n📈 PROTOCOL YIELDS");
    for (i, row) in snapshot.iter().enumerate() {
        let marker = match sources.get(i) {
            Some(YieldSource::OnChain) => "⛓️",
            _ => "🎲",
        };
        info!(
            "   {} {:<14} {:>6.2}%  TVL ${:>12}  24h {:+.2}%  {} risk  [{}]",
            marker, row.name, row.current_yield, row.tvl, row.change_24h, row.risk, row.category
        );
    }
}

pub fn print_allocations(allocations: &[AllocationEntry], simulation: &RebalanceSimulation) {
    info!("\n🎯 OPTIMAL ALLOCATION");
    for allocation in allocations {
        info!(
            "   {:<14} {:>6.2}%  ${:.2}  ({} risk)",
            allocation.protocol, allocation.percentage, allocation.amount.round_dp(2), allocation.risk
        );
    }
    info!("   Estimated gas: {} APT", simulation.estimated_gas);
    info!("   Estimated improvement: {:.2}%", simulation.estimated_yield);
    info!("   Portfolio risk score: {:.2} / 3", simulation.risk_score);
}

pub fn print_rebalance_result(result: &RebalanceResult) {
    match &result.outcome {
        RebalanceOutcome::Confirmed { gas_used } => {
            warn!("\n✅ REBALANCE #{}", result.id);
            warn!("   Tx Hash: {}", result.transaction_hash);
            warn!("   Gas Used: {} units ({} APT)", gas_used, result.gas_cost);
        }
        RebalanceOutcome::Synthetic { reason } => {
            warn!("\n🎭 SYNTHETIC REBALANCE #{}", result.id);
            warn!("   Not on-chain: {}", reason);
            warn!("   Placeholder Hash: {}", result.transaction_hash);
            warn!("   Placeholder Gas: {} APT", result.gas_cost);
        }
    }
    warn!("   Allocations: {}", result.new_allocations.len());
    warn!("   Estimated Improvement: {:.2}%", result.estimated_yield_improvement);
}

pub fn print_transaction_status(status: &TransactionStatus) {
    info!(
        "🔎 Transaction {} is {:?} (gas: {})",
        status.hash,
        status.status,
        status.gas_used.map(|g| g.to_string()).unwrap_or_else(|| "n/a".to_string())
    );
}

pub fn print_prophecy(prophecy: &Prophecy) {
    let prediction = &prophecy.prediction;
    let band = match prediction.confidence_band() {
        ConfidenceBand::High => "HIGH",
        ConfidenceBand::Medium => "MEDIUM",
        ConfidenceBand::Low => "LOW",
    };

    info!("\n🔮 PROPHECY ({}% mystical energy)", prophecy.mystical_energy);
    info!(
        "   {}: {:.2}% → {:.2}% within {} ({:+.2}%)",
        prediction.protocol,
        prediction.current_yield,
        prediction.predicted_yield,
        prediction.timeframe,
        prediction.yield_change()
    );
    info!("   Confidence: {:.0}% ({}), sentiment {:+.1}", prediction.confidence * 100.0, band, prediction.sentiment);
    for reason in &prediction.reasoning {
        info!("   • {}", reason);
    }
}
