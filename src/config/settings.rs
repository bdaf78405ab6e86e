//! Agent configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

// Network endpoints
pub const DEFAULT_NODE_URL: &str = "https://fullnode.testnet.aptoslabs.com/v1";
pub const DEFAULT_FAUCET_URL: &str = "https://faucet.testnet.aptoslabs.com";

// Chain constants
pub const OCTAS_PER_APT: u64 = 100_000_000;
pub const FAUCET_AMOUNT_OCTAS: u64 = 100_000_000; // 1 APT
pub const APT_COIN_STORE: &str = "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>";
pub const DEFAULT_REBALANCE_FUNCTION: &str = "0x1::yield_prophet::rebalance_portfolio";

// Transaction Constants
pub const DEFAULT_GAS_UNIT_PRICE: u64 = 100;
pub const MAX_GAS_UNIT_PRICE: u64 = 10_000;
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 200_000;
pub const TRANSACTION_EXPIRATION_SECS: u64 = 600;
pub const EXECUTION_TIMEOUT_SECS: u64 = 30;
pub const MAX_EXECUTION_TIMEOUT_SECS: u64 = 300;

// Dashboard Constants
pub const DEFAULT_PORTFOLIO_TOTAL: Decimal = dec!(125450);
pub const MAX_PORTFOLIO_TOTAL: Decimal = dec!(1000000000); // 1e17 octas
pub const REFRESH_INTERVAL_SECS: u64 = 30;
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 5;

// Client-local state
pub const DEFAULT_LOG_DIR: &str = "output/logs";
pub const DEFAULT_STATE_DIR: &str = "output/state";
pub const STATE_FILE_NAME: &str = "agent_state.json";
pub const WALLET_ADDRESS_KEY: &str = "wallet_address";

#[derive(Debug, Clone)]
pub struct Config {
    pub node_url: String,
    pub faucet_url: String,
    pub enable_faucet: bool,
    pub faucet_amount_octas: u64,
    pub private_key: Option<String>,
    // Portfolio Configuration
    pub portfolio_total: Decimal,
    pub refresh_interval_secs: u64,
    // Rebalance Execution Configuration
    pub rebalance_function: String,
    pub gas_unit_price: u64,
    pub max_gas_amount: u64,
    pub execution_timeout_secs: u64,
    // Output directories
    pub log_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            faucet_url: DEFAULT_FAUCET_URL.to_string(),
            enable_faucet: true,
            faucet_amount_octas: FAUCET_AMOUNT_OCTAS,
            private_key: None,
            portfolio_total: DEFAULT_PORTFOLIO_TOTAL,
            refresh_interval_secs: REFRESH_INTERVAL_SECS,
            rebalance_function: DEFAULT_REBALANCE_FUNCTION.to_string(),
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            execution_timeout_secs: EXECUTION_TIMEOUT_SECS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let defaults = Self::default();

        Self {
            node_url: env::var("APTOS_NODE_URL")
                .unwrap_or(defaults.node_url),
            faucet_url: env::var("APTOS_FAUCET_URL")
                .unwrap_or(defaults.faucet_url),
            enable_faucet: env::var("ENABLE_FAUCET")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            faucet_amount_octas: env::var("FAUCET_AMOUNT_OCTAS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(FAUCET_AMOUNT_OCTAS),
            private_key: env::var("PRIVATE_KEY").ok(),
            portfolio_total: parse_portfolio_total(env::var("PORTFOLIO_TOTAL").ok().as_deref()),
            refresh_interval_secs: env::var("REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(REFRESH_INTERVAL_SECS)
                .max(MIN_REFRESH_INTERVAL_SECS),
            rebalance_function: env::var("REBALANCE_FUNCTION")
                .unwrap_or(defaults.rebalance_function),
            gas_unit_price: env::var("GAS_UNIT_PRICE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_GAS_UNIT_PRICE)
                .min(MAX_GAS_UNIT_PRICE),
            max_gas_amount: env::var("MAX_GAS_AMOUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_GAS_AMOUNT),
            execution_timeout_secs: env::var("EXECUTION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(EXECUTION_TIMEOUT_SECS)
                .clamp(1, MAX_EXECUTION_TIMEOUT_SECS),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            state_dir: env::var("STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_dir),
        }
    }

    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join(STATE_FILE_NAME)
    }
}

/// Positive totals are capped at `MAX_PORTFOLIO_TOTAL`; anything else uses the default.
fn parse_portfolio_total(raw: Option<&str>) -> Decimal {
    raw.and_then(|s| Decimal::from_str(s.trim()).ok())
        .filter(|total| *total > Decimal::ZERO)
        .map(|total| total.min(MAX_PORTFOLIO_TOTAL))
        .unwrap_or(DEFAULT_PORTFOLIO_TOTAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_testnet() {
        let config = Config::default();
        assert_eq!(config.node_url, DEFAULT_NODE_URL);
        assert_eq!(config.gas_unit_price, 100);
        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.portfolio_total, dec!(125450));
        assert!(config.state_file().ends_with("agent_state.json"));
        assert_eq!(config.log_dir, PathBuf::from("output/logs"));
    }

    #[test]
    fn portfolio_total_is_bounded() {
        assert_eq!(parse_portfolio_total(Some("5000")), dec!(5000));
        assert_eq!(parse_portfolio_total(Some("10000000000000000000000")), MAX_PORTFOLIO_TOTAL);
        assert_eq!(parse_portfolio_total(Some("-3")), DEFAULT_PORTFOLIO_TOTAL);
        assert_eq!(parse_portfolio_total(Some("lots")), DEFAULT_PORTFOLIO_TOTAL);
        assert_eq!(parse_portfolio_total(None), DEFAULT_PORTFOLIO_TOTAL);
    }
}
