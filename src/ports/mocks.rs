use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, signature::Signature,
    transaction::VersionedTransaction,
};

use super::ledger::{LedgerError, LedgerPort, SignatureStatus, SimulationReport};
use super::relay::{RelayError, RelayPort};

/// Mock ledger that records calls and allows controlled responses
#[derive(Debug, Clone)]
pub struct MockLedger {
    blockhash_calls: Arc<Mutex<Vec<CommitmentConfig>>>,
    simulated: Arc<Mutex<Vec<(Signature, bool)>>>,
    status_calls: Arc<Mutex<Vec<Signature>>>,
    blockhash_error: Option<LedgerError>,
    simulation: Result<SimulationReport, LedgerError>,
    default_status: SignatureStatus,
    statuses: Arc<Mutex<HashMap<Signature, SignatureStatus>>>,
    pending_polls: Arc<Mutex<usize>>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self {
            blockhash_calls: Arc::default(),
            simulated: Arc::default(),
            status_calls: Arc::default(),
            blockhash_error: None,
            simulation: Ok(SimulationReport::default()),
            default_status: SignatureStatus::Succeeded,
            statuses: Arc::default(),
            pending_polls: Arc::default(),
        }
    }
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to fail every blockhash request
    pub fn with_blockhash_error(mut self, error: LedgerError) -> Self {
        self.blockhash_error = Some(error);
        self
    }

    /// Builder method to set the simulation response
    pub fn with_simulation(mut self, simulation: Result<SimulationReport, LedgerError>) -> Self {
        self.simulation = simulation;
        self
    }

    /// Builder method to set the status returned for any signature
    pub fn with_signature_status(mut self, status: SignatureStatus) -> Self {
        self.default_status = status;
        self
    }

    /// Builder method to set the status returned for one signature
    pub fn with_status_for(self, signature: Signature, status: SignatureStatus) -> Self {
        self.statuses.lock().unwrap().insert(signature, status);
        self
    }

    /// Builder method to report `Pending` for the first `polls` status calls
    pub fn with_pending_polls(self, polls: usize) -> Self {
        *self.pending_polls.lock().unwrap() = polls;
        self
    }

    /// Commitments of all blockhash requests
    pub fn blockhash_calls(&self) -> Vec<CommitmentConfig> {
        self.blockhash_calls.lock().unwrap().clone()
    }

    /// Signatures simulated, with their sig_verify flag
    pub fn simulated(&self) -> Vec<(Signature, bool)> {
        self.simulated.lock().unwrap().clone()
    }

    /// Signatures queried for status
    pub fn status_calls(&self) -> Vec<Signature> {
        self.status_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerPort for MockLedger {
    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> Result<Hash, LedgerError> {
        self.blockhash_calls.lock().unwrap().push(commitment);
        match &self.blockhash_error {
            Some(err) => Err(err.clone()),
            None => Ok(Hash::new_unique()),
        }
    }

    async fn simulate_transaction(
        &self,
        transaction: &VersionedTransaction,
        sig_verify: bool,
    ) -> Result<SimulationReport, LedgerError> {
        let signature = transaction.signatures.first().copied().unwrap_or_default();
        self.simulated.lock().unwrap().push((signature, sig_verify));
        self.simulation.clone()
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, LedgerError> {
        self.status_calls.lock().unwrap().push(*signature);

        let mut pending = self.pending_polls.lock().unwrap();
        if *pending > 0 {
            *pending -= 1;
            return Ok(SignatureStatus::Pending);
        }

        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(signature)
            .cloned()
            .unwrap_or_else(|| self.default_status.clone()))
    }
}

/// Mock relay that records calls and allows controlled per-endpoint responses
#[derive(Debug, Clone, Default)]
pub struct MockRelay {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    responses: Arc<Mutex<HashMap<String, Result<String, RelayError>>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
}

impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to accept bundles at `endpoint` with `bundle_id`
    pub fn with_success(self, endpoint: &str, bundle_id: &str) -> Self {
        self.with_response(endpoint, Ok(bundle_id.to_string()))
    }

    /// Builder method to fail bundles at `endpoint`
    pub fn with_failure(self, endpoint: &str, error: RelayError) -> Self {
        self.with_response(endpoint, Err(error))
    }

    /// Builder method to set a response for a given endpoint
    pub fn with_response(self, endpoint: &str, response: Result<String, RelayError>) -> Self {
        self.responses.lock().unwrap().insert(endpoint.to_string(), response);
        self
    }

    /// Builder method to delay responses from `endpoint`
    pub fn with_delay(self, endpoint: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(endpoint.to_string(), delay);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RelayPort for MockRelay {
    async fn send_bundle(&self, endpoint: &str, transactions: &[String]) -> Result<String, RelayError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), transactions.to_vec()));

        let delay = self.delays.lock().unwrap().get(endpoint).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| Err(RelayError::NetworkError("No response configured".to_string())))
    }
}
