//! Yield Prophet agent service
//!
//! One instance per process, built from a [`Config`] and an injected
//! [`ChainClient`]. Every operation that reads chain state degrades to a
//! sampled, labelled value instead of failing; only missing accounts, bad keys
//! and unusable optimizer input surface as errors.

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn, Level};
use crate::{
    allocation::optimize,
    config::{Config, APT_COIN_STORE},
    errors::{AgentError, AgentResult, ErrorRecovery, RecoveryAction},
    execution::{ExecutionSettings, RebalanceExecutor},
    network::{AccountResource, ChainClient, TransactionInfo},
    oracle::{market_snapshot, Oracle},
    storage::WalletStore,
    types::{
        AccountAddress, AllocationEntry, Prophecy, ProtocolSnapshot, ProtocolYield, RebalanceResult,
        RebalanceSimulation, TransactionState, TransactionStatus, YieldSource, TRACKED_PROTOCOLS,
    },
    utils::octas_to_apt,
    wallet::{LocalAccount, WalletSession},
    yields::sample,
};

pub struct YieldProphetAgent {
    client: Arc<dyn ChainClient>,
    session: WalletSession,
    store: WalletStore,
    executor: RebalanceExecutor,
    recovery: Arc<ErrorRecovery>,
    oracle: Oracle,
    rng: Mutex<StdRng>,
    config: Config,
}

impl YieldProphetAgent {
    pub fn new(client: Arc<dyn ChainClient>, config: &Config) -> Self {
        Self::with_rng(client, config, StdRng::from_os_rng())
    }

    /// Agent whose synthetic figures all derive from `rng`.
    pub fn with_rng(client: Arc<dyn ChainClient>, config: &Config, mut rng: StdRng) -> Self {
        let recovery = Arc::new(ErrorRecovery::new());
        let executor = RebalanceExecutor::with_rng(
            client.clone(),
            ExecutionSettings::from(config),
            recovery.clone(),
            StdRng::seed_from_u64(rng.random()),
        );

        Self {
            client,
            session: WalletSession::new(),
            store: WalletStore::new(config.state_file()),
            executor,
            recovery,
            oracle: Oracle::new(),
            rng: Mutex::new(rng),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    /// Load `private_key` (or generate a demo account), fund it and remember it.
    ///
    /// Funding and persistence failures are logged; only an unreadable key fails.
    pub async fn connect_wallet(&self, private_key: Option<&str>) -> AgentResult<AccountAddress> {
        let account = match private_key {
            Some(key) => LocalAccount::from_private_key_hex(key).map_err(|e| AgentError::Connection {
                message: "private key could not be loaded".to_string(),
                source: Some(e),
            }),
            None => Ok(LocalAccount::generate()),
        };
        let account = match account {
            Ok(account) => account,
            Err(e) => {
                self.recovery.handle_error(&e).await;
                return Err(e);
            }
        };

        let address = account.address();
        self.session.connect(account).await;
        info!("🔗 Wallet connected: {}", address);

        if self.config.enable_faucet {
            if let Err(e) = self.client.fund_account(&address, self.config.faucet_amount_octas).await {
                self.absorb(AgentError::Funding { address: address.to_hex(), source: e }).await;
            }
        }

        if let Err(e) = self.store.save_address(&address) {
            self.absorb(AgentError::Storage { context: "save wallet address".to_string(), source: e }).await;
        }

        Ok(address)
    }

    pub async fn disconnect_wallet(&self) -> Option<AccountAddress> {
        let previous = self.session.disconnect().await.map(|account| account.address());

        if let Err(e) = self.store.clear_address() {
            self.absorb(AgentError::Storage { context: "clear wallet address".to_string(), source: e }).await;
        }
        previous
    }

    /// Address remembered from an earlier run. The key itself is never stored,
    /// so the session stays disconnected until [`Self::connect_wallet`].
    pub async fn restore_session(&self) -> Option<AccountAddress> {
        match self.store.saved_address() {
            Ok(address) => {
                if let Some(address) = &address {
                    info!("♻️  Previous wallet found: {}", address);
                }
                address
            }
            Err(e) => {
                self.absorb(AgentError::Storage { context: "read wallet address".to_string(), source: e }).await;
                None
            }
        }
    }

    pub async fn connected_address(&self) -> Option<AccountAddress> {
        self.session.address().await
    }

    /// Sampled yields for every tracked protocol, queried one at a time.
    pub async fn get_protocol_yields(&self) -> Vec<ProtocolYield> {
        let mut yields = Vec::with_capacity(TRACKED_PROTOCOLS.len());

        for protocol in TRACKED_PROTOCOLS.iter() {
            let source = match self.client
                .get_account_resource(protocol.contract_address, &protocol.pool_info_type())
                .await
            {
                Ok(_) => YieldSource::OnChain,
                Err(e) => {
                    let error = AgentError::YieldFetch { protocol: protocol.name.to_string(), source: e };
                    match self.recovery.handle_error(&error).await {
                        RecoveryAction::Fallback { source } => {
                            debug!("{}: pool lookup failed, using {}", protocol.name, source);
                        }
                        _ => warn!("{}: {:#}", protocol.name, anyhow::Error::from(error)),
                    }
                    YieldSource::Synthetic
                }
            };

            yields.push(
                sample(protocol.contract_address, Utc::now())
                    .with_protocol(protocol.name)
                    .with_source(source),
            );
        }

        info!("📊 Sampled {} protocol yields", yields.len());
        yields
    }

    pub fn optimize_portfolio(&self, yields: &[ProtocolYield], portfolio_total: Decimal) -> AgentResult<Vec<AllocationEntry>> {
        optimize(yields, portfolio_total)
    }

    /// Rebalance from the connected account. Chain failures come back as a
    /// synthetic result; only a missing account is an error.
    pub async fn execute_rebalancing(&self, allocations: &[AllocationEntry]) -> AgentResult<RebalanceResult> {
        let account = self.session.current().await;
        let result = self.executor.execute(allocations, account.as_deref()).await;

        if let Err(e) = &result {
            self.recovery.handle_error(e).await;
            warn!("❌ Rebalance rejected: {}", e);
        }
        result
    }

    /// Lookup failures report `Pending` rather than an error.
    pub async fn get_transaction_status(&self, hash: &str) -> TransactionStatus {
        match self.client.get_transaction_by_hash(hash).await {
            Ok(transaction) => transaction_status(&transaction),
            Err(e) => {
                debug!("Status lookup for {} failed, reporting pending: {:#}", hash, e);
                TransactionStatus {
                    hash: hash.to_string(),
                    status: TransactionState::Pending,
                    gas_used: None,
                    timestamp: Utc::now(),
                }
            }
        }
    }

    /// APT balance of the connected account; zero when unknown.
    pub async fn get_account_balance(&self) -> Decimal {
        let Some(address) = self.session.address().await else {
            return Decimal::ZERO;
        };

        match self.client.get_account_resources(&address).await {
            Ok(resources) => find_apt_balance(&resources).unwrap_or_else(|| {
                debug!("No readable APT coin store for {}", address.short());
                Decimal::ZERO
            }),
            Err(e) => {
                debug!("Balance lookup for {} failed: {:#}", address.short(), e);
                Decimal::ZERO
            }
        }
    }

    pub async fn simulate_transaction(&self, allocations: &[AllocationEntry]) -> RebalanceSimulation {
        self.executor.simulate(allocations).await
    }

    pub async fn market_snapshot(&self, yields: &[ProtocolYield]) -> Vec<ProtocolSnapshot> {
        market_snapshot(yields, &mut *self.rng.lock().await)
    }

    pub async fn reveal_prophecy(&self) -> Option<Prophecy> {
        self.oracle.reveal_prophecy(&mut *self.rng.lock().await)
    }

    pub async fn error_summary(&self) -> HashMap<String, u32> {
        self.recovery.error_summary().await
    }

    /// Record a recoverable error and log it at the level its strategy asks for.
    async fn absorb(&self, error: AgentError) {
        match self.recovery.handle_error(&error).await {
            RecoveryAction::Skip { log_level } if log_level == Level::ERROR => {
                error!("{:#}", anyhow::Error::from(error));
            }
            _ => warn!("⚠️ {:#}", anyhow::Error::from(error)),
        }
    }
}

fn transaction_status(transaction: &TransactionInfo) -> TransactionStatus {
    let status = if transaction.is_pending() {
        TransactionState::Pending
    } else if transaction.success == Some(true) {
        TransactionState::Success
    } else {
        TransactionState::Failed
    };

    TransactionStatus {
        hash: transaction.hash.clone(),
        status,
        gas_used: transaction.gas_used,
        timestamp: transaction
            .timestamp
            .and_then(|micros| i64::try_from(micros).ok())
            .and_then(DateTime::from_timestamp_micros)
            .unwrap_or_else(Utc::now),
    }
}

/// Balance from the APT `CoinStore` among an account's resources.
fn find_apt_balance(resources: &[AccountResource]) -> Option<Decimal> {
    resources
        .iter()
        .find(|r| r.resource_type == APT_COIN_STORE)
        .and_then(coin_store_balance)
}

/// `coin.value` octas of a `CoinStore` resource, in APT.
fn coin_store_balance(resource: &AccountResource) -> Option<Decimal> {
    let value = &resource.data["coin"]["value"];
    let octas = match value {
        serde_json::Value::String(raw) => raw.parse().ok()?,
        other => other.as_u64()?,
    };
    Some(octas_to_apt(octas))
}
