//! Rebalance execution engine

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};
use crate::{
    config::Config,
    errors::{AgentError, AgentResult, ErrorRecovery, RecoveryAction},
    execution::simulation::{create_synthetic_result, estimate_yield_improvement, simulate_rebalance},
    network::{ChainClient, EntryFunctionPayload},
    types::{AllocationEntry, RebalanceOutcome, RebalanceResult, RebalanceSimulation},
    utils::{gas_cost_apt, to_basis_points, to_octas},
    wallet::LocalAccount,
};

#[derive(Debug, Clone)]
pub struct ExecutionSettings {
    pub rebalance_function: String,
    pub gas_unit_price: u64,
    pub timeout: Duration,
}

impl From<&Config> for ExecutionSettings {
    fn from(config: &Config) -> Self {
        Self {
            rebalance_function: config.rebalance_function.clone(),
            gas_unit_price: config.gas_unit_price,
            timeout: Duration::from_secs(config.execution_timeout_secs),
        }
    }
}

pub struct RebalanceExecutor {
    client: Arc<dyn ChainClient>,
    settings: ExecutionSettings,
    recovery: Arc<ErrorRecovery>,
    rng: Mutex<StdRng>,
}

impl RebalanceExecutor {
    pub fn new(
        client: Arc<dyn ChainClient>,
        settings: ExecutionSettings,
        recovery: Arc<ErrorRecovery>,
    ) -> Self {
        Self::with_rng(client, settings, recovery, StdRng::from_os_rng())
    }

    /// Executor with a caller-supplied random source for the synthetic metrics.
    pub fn with_rng(
        client: Arc<dyn ChainClient>,
        settings: ExecutionSettings,
        recovery: Arc<ErrorRecovery>,
        rng: StdRng,
    ) -> Self {
        Self {
            client,
            settings,
            recovery,
            rng: Mutex::new(rng),
        }
    }

    /// Submit `allocations` as a rebalance transaction from `account`.
    ///
    /// Only a missing account is an error. Any chain failure or timeout yields
    /// a result marked [`RebalanceOutcome::Synthetic`].
    pub async fn execute(
        &self,
        allocations: &[AllocationEntry],
        account: Option<&LocalAccount>,
    ) -> AgentResult<RebalanceResult> {
        let account = account.ok_or(AgentError::NoAccountConnected)?;
        let execution_start = Instant::now();

        info!("🚀 Rebalancing {} allocations from {}", allocations.len(), account.address().short());

        let submission = tokio::select! {
            result = self.submit_and_confirm(allocations, account) => result,
            _ = tokio::time::sleep(self.settings.timeout) => {
                Err(anyhow::anyhow!("Rebalance timeout after {:?}", self.settings.timeout))
            }
        };

        let mut rng = self.rng.lock().await;
        match submission {
            Ok((transaction_hash, gas_used)) => {
                let gas_cost = gas_cost_apt(gas_used, self.settings.gas_unit_price);
                info!(
                    hash = %transaction_hash,
                    gas_used,
                    elapsed_ms = execution_start.elapsed().as_millis() as u64,
                    "✅ Rebalance confirmed"
                );

                Ok(RebalanceResult {
                    id: uuid::Uuid::new_v4().to_string(),
                    timestamp: chrono::Utc::now(),
                    transaction_hash,
                    new_allocations: allocations.to_vec(),
                    gas_cost,
                    estimated_yield_improvement: estimate_yield_improvement(allocations, &mut *rng),
                    outcome: RebalanceOutcome::Confirmed { gas_used },
                })
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                let error = AgentError::Submission { message: reason.clone(), source: e };

                match self.recovery.handle_error(&error).await {
                    RecoveryAction::Fallback { source } => {
                        warn!("Rebalancing execution failed, falling back to {}: {}", source, reason);
                        Ok(create_synthetic_result(allocations, reason, &mut *rng))
                    }
                    _ => Err(error),
                }
            }
        }
    }

    pub async fn simulate(&self, allocations: &[AllocationEntry]) -> RebalanceSimulation {
        simulate_rebalance(allocations, &mut *self.rng.lock().await)
    }

    async fn submit_and_confirm(
        &self,
        allocations: &[AllocationEntry],
        account: &LocalAccount,
    ) -> Result<(String, u64)> {
        let payload = build_rebalance_payload(&self.settings.rebalance_function, allocations)
            .context("Failed to encode rebalance payload")?;

        let hash = self.client
            .submit_transaction(account, &payload)
            .await
            .context("Failed to submit rebalance transaction")?;
        info!("📡 Rebalance transaction sent: {}", hash);

        self.client
            .wait_for_transaction(&hash)
            .await
            .context("Rebalance transaction was not confirmed")?;

        let details = self.client
            .get_transaction_by_hash(&hash)
            .await
            .context("Failed to read rebalance transaction")?;

        Ok((hash, details.gas_used.unwrap_or(DEFAULT_GAS_USED)))
    }
}

/// Gas assumed when the node omits `gas_used`.
const DEFAULT_GAS_USED: u64 = 1000;

/// `[protocol ids, basis points, octas]` for the rebalance entry function.
pub fn build_rebalance_payload(function: &str, allocations: &[AllocationEntry]) -> Result<EntryFunctionPayload> {
    let protocols: Vec<&str> = allocations.iter().map(|a| a.protocol.as_str()).collect();
    let basis_points: Vec<String> = allocations
        .iter()
        .map(|a| to_basis_points(a.percentage).to_string())
        .collect();
    let octas = allocations
        .iter()
        .map(|a| {
            to_octas(a.amount)
                .map(|o| o.to_string())
                .with_context(|| format!("Invalid amount for {}", a.protocol))
        })
        .collect::<Result<Vec<String>>>()?;

    Ok(EntryFunctionPayload::new(function, vec![json!(protocols), json!(basis_points), json!(octas)]))
}
