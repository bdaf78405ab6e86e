//! Crystal-ball prediction types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use super::RiskTier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldPrediction {
    pub protocol: String,
    pub current_yield: f64,
    pub predicted_yield: f64,
    pub confidence: f64,
    pub timeframe: String,
    pub reasoning: Vec<String>,
    pub sentiment: f64,
}

impl YieldPrediction {
    pub fn yield_change(&self) -> f64 {
        self.predicted_yield - self.current_yield
    }

    pub fn is_bullish(&self) -> bool {
        self.yield_change() > 0.0
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceBand {
    High,   // > 80%
    Medium, // > 60%
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            ConfidenceBand::High
        } else if confidence > 0.6 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReading {
    pub protocol: String,
    pub sentiment: f64,
    pub confidence: f64,
    pub mention_count: u32,
    pub keywords: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Prophecy {
    pub prediction: YieldPrediction,
    pub mystical_energy: u8,
    pub revealed_at: DateTime<Utc>,
}

/// Display row combining a sampled yield with simulated market movement.
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolSnapshot {
    pub name: String,
    pub current_yield: f64,
    pub tvl: Decimal,
    pub change_24h: f64,
    pub risk: RiskTier,
    pub category: String,
}
