//! Prophecy reveal and market snapshot generation

use chrono::Utc;
use rand::{seq::IndexedRandom, Rng};
use super::{fixture_predictions, fixture_sentiment};
use crate::types::{
    tracked_protocol, Prophecy, ProtocolSnapshot, ProtocolYield, SentimentReading, YieldPrediction,
};

pub const MIN_MYSTICAL_ENERGY: u8 = 75;
pub const MAX_MYSTICAL_ENERGY: u8 = 95;
pub const MAX_DAILY_CHANGE_PCT: f64 = 3.0;
pub const DEFAULT_CATEGORY: &str = "DeFi";

pub struct Oracle {
    predictions: Vec<YieldPrediction>,
    sentiment: Vec<SentimentReading>,
}

impl Default for Oracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle {
    pub fn new() -> Self {
        Self::with_fixtures(fixture_predictions(), fixture_sentiment(Utc::now()))
    }

    pub fn with_fixtures(predictions: Vec<YieldPrediction>, sentiment: Vec<SentimentReading>) -> Self {
        Self { predictions, sentiment }
    }

    pub fn predictions(&self) -> &[YieldPrediction] {
        &self.predictions
    }

    pub fn sentiment(&self) -> &[SentimentReading] {
        &self.sentiment
    }

    pub fn sentiment_for(&self, protocol: &str) -> Option<&SentimentReading> {
        self.sentiment.iter().find(|s| s.protocol == protocol)
    }

    /// Pick a prediction uniformly and attach an energy level in [75, 95).
    ///
    /// `None` only when the oracle holds no predictions.
    pub fn reveal_prophecy<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Prophecy> {
        let prediction = self.predictions.choose(rng)?.clone();
        Some(Prophecy {
            prediction,
            mystical_energy: rng.random_range(MIN_MYSTICAL_ENERGY..MAX_MYSTICAL_ENERGY),
            revealed_at: Utc::now(),
        })
    }
}

/// Dashboard rows: sampled yields with a simulated 24h change in [-3, 3).
pub fn market_snapshot<R: Rng + ?Sized>(yields: &[ProtocolYield], rng: &mut R) -> Vec<ProtocolSnapshot> {
    yields
        .iter()
        .map(|y| ProtocolSnapshot {
            name: y.protocol.clone(),
            current_yield: y.apy,
            tvl: y.tvl,
            change_24h: rng.random_range(-MAX_DAILY_CHANGE_PCT..MAX_DAILY_CHANGE_PCT),
            risk: y.risk,
            category: tracked_protocol(&y.protocol)
                .map(|p| p.category)
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RiskTier, YieldSource};
    use rand::{rngs::StdRng, SeedableRng};
    use rust_decimal_macros::dec;

    fn yield_for(protocol: &str) -> ProtocolYield {
        ProtocolYield {
            protocol: protocol.to_string(),
            apy: 12.0,
            tvl: dec!(1000000),
            risk: RiskTier::Low,
            last_updated: Utc::now(),
            source: YieldSource::Synthetic,
        }
    }

    #[test]
    fn prophecy_energy_stays_in_range() {
        let oracle = Oracle::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let prophecy = oracle.reveal_prophecy(&mut rng).unwrap();
            assert!((75..95).contains(&prophecy.mystical_energy));
            assert!(oracle.predictions().contains(&prophecy.prediction));
        }
    }

    #[test]
    fn empty_oracle_reveals_nothing() {
        let oracle = Oracle::with_fixtures(Vec::new(), Vec::new());
        assert!(oracle.reveal_prophecy(&mut StdRng::seed_from_u64(1)).is_none());
    }

    #[test]
    fn snapshot_uses_tracked_categories() {
        let yields = vec![yield_for("LiquidSwap"), yield_for("Unknown Pool")];
        let snapshot = market_snapshot(&yields, &mut StdRng::seed_from_u64(5));

        assert_eq!(snapshot[0].category, "DEX");
        assert_eq!(snapshot[1].category, DEFAULT_CATEGORY);
        assert!(snapshot.iter().all(|s| (-3.0..3.0).contains(&s.change_24h)));
    }

    #[test]
    fn sentiment_lookup_by_protocol() {
        let oracle = Oracle::new();
        assert_eq!(oracle.sentiment_for("Joule Finance").map(|s| s.mention_count), Some(234));
        assert!(oracle.sentiment_for("Nowhere").is_none());
    }
}
