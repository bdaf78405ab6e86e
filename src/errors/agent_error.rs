//! Custom error types for the agent

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Wallet connection failed: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Testnet funding failed for {address}")]
    Funding {
        address: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Yield fetch failed for {protocol}")]
    YieldFetch {
        protocol: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Transaction submission failed: {message}")]
    Submission {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("No wallet connected")]
    NoAccountConnected,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("State storage error: {context}")]
    Storage {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AgentError {
    /// Missing or failed wallet setup. Never retried.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, AgentError::Connection { .. } | AgentError::NoAccountConnected)
    }
}

pub type AgentResult<T> = Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_account_is_a_connection_error() {
        assert!(AgentError::NoAccountConnected.is_connection_error());
        assert!(!AgentError::InvalidInput("empty".into()).is_connection_error());
    }

    #[test]
    fn source_chain_is_preserved() {
        use std::error::Error;

        let err = AgentError::Submission {
            message: "submit".into(),
            source: anyhow::anyhow!("connection reset"),
        };
        assert_eq!(err.to_string(), "Transaction submission failed: submit");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("connection reset"));
    }
}
