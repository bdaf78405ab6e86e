//! Error recovery strategies
//!
//! Almost every failure in the agent is absorbed: funding failures are logged,
//! yield lookups fall back to the sampler and failed submissions fall back to
//! a synthetic rebalance. Only connection-class errors and bad input escalate.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::Level;
use super::AgentError;

pub const YIELD_SAMPLER_FALLBACK: &str = "yield_sampler";
pub const SYNTHETIC_REBALANCE_FALLBACK: &str = "synthetic_rebalance";

pub struct ErrorRecovery {
    pub error_counts: Arc<RwLock<HashMap<String, u32>>>,
    pub recovery_strategies: HashMap<String, RecoveryStrategy>,
}

#[derive(Debug, Clone)]
pub enum RecoveryStrategy {
    Fallback { alternative_source: String },
    Skip { log_level: Level },
    Escalate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryAction {
    Fallback { source: String },
    Skip { log_level: Level },
    Escalate,
}

impl Default for ErrorRecovery {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorRecovery {
    pub fn new() -> Self {
        let mut strategies = HashMap::new();

        strategies.insert(
            "connection".to_string(),
            RecoveryStrategy::Escalate,
        );

        strategies.insert(
            "funding".to_string(),
            RecoveryStrategy::Skip {
                log_level: Level::WARN,
            },
        );

        strategies.insert(
            "yield_fetch".to_string(),
            RecoveryStrategy::Fallback {
                alternative_source: YIELD_SAMPLER_FALLBACK.to_string(),
            },
        );

        strategies.insert(
            "submission".to_string(),
            RecoveryStrategy::Fallback {
                alternative_source: SYNTHETIC_REBALANCE_FALLBACK.to_string(),
            },
        );

        strategies.insert(
            "storage".to_string(),
            RecoveryStrategy::Skip {
                log_level: Level::ERROR,
            },
        );

        Self {
            error_counts: Arc::new(RwLock::new(HashMap::new())),
            recovery_strategies: strategies,
        }
    }

    pub async fn handle_error(&self, error: &AgentError) -> RecoveryAction {
        let error_type = self.classify_error(error);
        *self.error_counts.write().await.entry(error_type.to_string()).or_insert(0) += 1;

        match self.recovery_strategies.get(error_type) {
            Some(RecoveryStrategy::Fallback { alternative_source }) => {
                RecoveryAction::Fallback {
                    source: alternative_source.clone(),
                }
            }
            Some(RecoveryStrategy::Skip { log_level }) => {
                RecoveryAction::Skip {
                    log_level: *log_level,
                }
            }
            Some(RecoveryStrategy::Escalate) | None => RecoveryAction::Escalate,
        }
    }

    pub async fn error_summary(&self) -> HashMap<String, u32> {
        self.error_counts.read().await.clone()
    }

    fn classify_error(&self, error: &AgentError) -> &'static str {
        match error {
            AgentError::Connection { .. } | AgentError::NoAccountConnected => "connection",
            AgentError::Funding { .. } => "funding",
            AgentError::YieldFetch { .. } => "yield_fetch",
            AgentError::Submission { .. } => "submission",
            AgentError::InvalidInput(_) => "invalid_input",
            AgentError::Storage { .. } => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submission_falls_back_to_synthetic_rebalance() {
        let recovery = ErrorRecovery::new();
        let err = AgentError::Submission {
            message: "timeout".into(),
            source: anyhow::anyhow!("timed out"),
        };

        assert_eq!(
            recovery.handle_error(&err).await,
            RecoveryAction::Fallback { source: SYNTHETIC_REBALANCE_FALLBACK.to_string() }
        );
    }

    #[tokio::test]
    async fn connection_errors_escalate_and_are_counted() {
        let recovery = ErrorRecovery::new();

        assert_eq!(recovery.handle_error(&AgentError::NoAccountConnected).await, RecoveryAction::Escalate);
        assert_eq!(
            recovery.handle_error(&AgentError::InvalidInput("empty".into())).await,
            RecoveryAction::Escalate
        );
        let funding = AgentError::Funding {
            address: "0x1".into(),
            source: anyhow::anyhow!("faucet down"),
        };
        assert_eq!(
            recovery.handle_error(&funding).await,
            RecoveryAction::Skip { log_level: Level::WARN }
        );

        let summary = recovery.error_summary().await;
        assert_eq!(summary.get("connection"), Some(&1));
        assert_eq!(summary.get("funding"), Some(&1));
    }
}
