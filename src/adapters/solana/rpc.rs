use async_trait::async_trait;
use solana_client::{rpc_client::RpcClient, rpc_config::RpcSimulateTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    signature::Signature,
    transaction::VersionedTransaction,
};
use solana_transaction_status::UiTransactionEncoding;
use std::sync::Arc;

use crate::ports::ledger::{LedgerError, LedgerPort, SignatureStatus, SimulationReport};

/// Wrapper around Solana RPC client with async-compatible methods
#[derive(Clone)]
pub struct SolanaClient {
    client: Arc<RpcClient>,
    commitment: CommitmentConfig,
}

impl SolanaClient {
    /// Create a new Solana RPC client
    pub fn new(rpc_url: String) -> Self {
        Self::new_with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    /// Create a client whose default commitment is `commitment`
    pub fn new_with_commitment(rpc_url: String, commitment: CommitmentConfig) -> Self {
        let client = Arc::new(RpcClient::new_with_commitment(rpc_url, commitment));
        Self { client, commitment }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl LedgerPort for SolanaClient {
    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> Result<Hash, LedgerError> {
        // Spawn blocking to make sync RPC call async-compatible
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_latest_blockhash_with_commitment(commitment)
                .map(|(blockhash, _last_valid_height)| blockhash)
                .map_err(|e| LedgerError::RpcError(e.to_string()))
        })
        .await
        .map_err(|e| LedgerError::JoinError(e.to_string()))?
    }

    async fn simulate_transaction(
        &self,
        transaction: &VersionedTransaction,
        sig_verify: bool,
    ) -> Result<SimulationReport, LedgerError> {
        let tx = transaction.clone();
        let client = Arc::clone(&self.client);
        let config = RpcSimulateTransactionConfig {
            sig_verify,
            commitment: Some(self.commitment),
            encoding: Some(UiTransactionEncoding::Base64),
            ..RpcSimulateTransactionConfig::default()
        };

        tokio::task::spawn_blocking(move || {
            client
                .simulate_transaction_with_config(&tx, config)
                .map(|response| SimulationReport {
                    err: response.value.err.map(|e| e.to_string()),
                    logs: response.value.logs.unwrap_or_default(),
                    units_consumed: response.value.units_consumed,
                })
                .map_err(|e| LedgerError::RpcError(e.to_string()))
        })
        .await
        .map_err(|e| LedgerError::JoinError(e.to_string()))?
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, LedgerError> {
        let signature = *signature;
        let client = Arc::clone(&self.client);

        tokio::task::spawn_blocking(move || {
            client
                .get_signature_status_with_commitment(&signature, commitment)
                .map(|status| match status {
                    None => SignatureStatus::Pending,
                    Some(Ok(())) => SignatureStatus::Succeeded,
                    Some(Err(e)) => SignatureStatus::Failed(e.to_string()),
                })
                .map_err(|e| LedgerError::RpcError(e.to_string()))
        })
        .await
        .map_err(|e| LedgerError::JoinError(e.to_string()))?
    }
}
