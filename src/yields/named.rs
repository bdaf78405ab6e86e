//! Static yield profiles for protocols addressed by name

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use crate::types::RiskTier;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedProfile {
    pub name: &'static str,
    pub base_yield: f64,
    pub base_tvl: Decimal,
    pub risk: RiskTier,
}

pub const NAMED_PROFILES: &[NamedProfile] = &[
    NamedProfile { name: "Thala Finance", base_yield: 12.5, base_tvl: dec!(45000000), risk: RiskTier::Low },
    NamedProfile { name: "LiquidSwap", base_yield: 18.3, base_tvl: dec!(32000000), risk: RiskTier::Medium },
    NamedProfile { name: "Joule", base_yield: 22.7, base_tvl: dec!(18000000), risk: RiskTier::High },
    NamedProfile { name: "Echelon", base_yield: 15.8, base_tvl: dec!(25000000), risk: RiskTier::Medium },
];

const DEFAULT_PROFILE: NamedProfile = NamedProfile {
    name: "Unknown",
    base_yield: 10.0,
    base_tvl: dec!(5000000),
    risk: RiskTier::Medium,
};

pub fn named_profile(name: &str) -> Option<&'static NamedProfile> {
    NAMED_PROFILES.iter().find(|p| p.name == name)
}

pub fn default_profile() -> &'static NamedProfile {
    &DEFAULT_PROFILE
}
