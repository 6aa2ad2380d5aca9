use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, signature::Signature,
    transaction::VersionedTransaction,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("RPC request failed: {0}")]
    RpcError(String),
    #[error("Task join error: {0}")]
    JoinError(String),
}

/// Outcome of a diagnostic simulation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    /// Transaction error reported by the simulator
    pub err: Option<String>,
    /// Program logs
    pub logs: Vec<String>,
    /// Compute units consumed
    pub units_consumed: Option<u64>,
}

impl SimulationReport {
    pub fn is_success(&self) -> bool {
        self.err.is_none()
    }
}

/// Ledger view of a single signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureStatus {
    /// Not yet seen at the requested commitment
    Pending,
    /// Landed without error
    Succeeded,
    /// Landed with a transaction error
    Failed(String),
}

/// Ledger RPC operations the bundler depends on
#[async_trait]
pub trait LedgerPort: Send + Sync {
    /// Recent blockhash at the given commitment
    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> Result<Hash, LedgerError>;

    /// Simulate a transaction; diagnostics only
    async fn simulate_transaction(
        &self,
        transaction: &VersionedTransaction,
        sig_verify: bool,
    ) -> Result<SimulationReport, LedgerError>;

    /// Current status of a signature at the given commitment
    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, LedgerError>;
}
