//! Protocol yield types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Score multiplier used by the allocation optimizer.
    pub fn score_multiplier(&self) -> f64 {
        match self {
            RiskTier::Low => 1.2,
            RiskTier::Medium => 1.0,
            RiskTier::High => 0.8,
        }
    }

    /// Ordinal weight used for portfolio risk scoring.
    pub fn weight(&self) -> f64 {
        match self {
            RiskTier::Low => 1.0,
            RiskTier::Medium => 2.0,
            RiskTier::High => 3.0,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Medium => write!(f, "Medium"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// Where a yield figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldSource {
    /// The pool resource was readable; figures are still sampled.
    OnChain,
    /// The pool lookup failed and the sampler stood in.
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolYield {
    pub protocol: String,
    pub apy: f64,
    pub tvl: Decimal,
    pub risk: RiskTier,
    pub last_updated: DateTime<Utc>,
    pub source: YieldSource,
}

impl ProtocolYield {
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_source(mut self, source: YieldSource) -> Self {
        self.source = source;
        self
    }

    /// Ranking score: annual yield weighted by risk tier.
    pub fn score(&self) -> f64 {
        self.apy * self.risk.score_multiplier()
    }
}
