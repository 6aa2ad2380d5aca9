//! Confirmation Checker
//!
//! Polls the ledger for a signature until it lands, fails, or the deadline
//! passes. By default only the fee transaction is checked: the relay
//! executes a bundle all-or-nothing, so the fee transaction landing means
//! the whole bundle landed.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use solana_sdk::{commitment_config::CommitmentConfig, signature::Signature};
use tokio::time::Instant;

use crate::domain::Bundle;
use crate::ports::{LedgerPort, SignatureStatus};

/// Which bundle signatures must land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationMode {
    /// Fee transaction only; relies on relay atomicity
    #[default]
    FeeOnly,
    /// Every transaction in the bundle
    AllSignatures,
}

/// Final status of one signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Landed,
    Failed(String),
    TimedOut,
}

impl ConfirmationStatus {
    pub fn is_landed(&self) -> bool {
        matches!(self, ConfirmationStatus::Landed)
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmationSettings {
    pub commitment: CommitmentConfig,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub mode: ConfirmationMode,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
            mode: ConfirmationMode::FeeOnly,
        }
    }
}

pub struct ConfirmationChecker {
    ledger: Arc<dyn LedgerPort>,
    settings: ConfirmationSettings,
}

impl ConfirmationChecker {
    pub fn new(ledger: Arc<dyn LedgerPort>, settings: ConfirmationSettings) -> Self {
        Self { ledger, settings }
    }

    pub fn settings(&self) -> &ConfirmationSettings {
        &self.settings
    }

    /// Poll one signature until it reaches a final status
    ///
    /// RPC errors while polling are treated as "not yet known".
    pub async fn await_signature(&self, signature: &Signature) -> ConfirmationStatus {
        self.await_signature_until(signature, Instant::now() + self.settings.timeout)
            .await
    }

    async fn await_signature_until(&self, signature: &Signature, deadline: Instant) -> ConfirmationStatus {
        loop {
            match self
                .ledger
                .get_signature_status(signature, self.settings.commitment)
                .await
            {
                Ok(SignatureStatus::Succeeded) => return ConfirmationStatus::Landed,
                Ok(SignatureStatus::Failed(err)) => return ConfirmationStatus::Failed(err),
                Ok(SignatureStatus::Pending) => {}
                Err(err) => {
                    tracing::debug!(signature = %signature, error = %err, "Signature status query failed");
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return ConfirmationStatus::TimedOut;
            }
            tokio::time::sleep(self.settings.poll_interval.min(deadline - now)).await;
        }
    }

    /// Decide whether the bundle landed according to the configured mode
    ///
    /// One timeout covers the whole bundle, however many signatures are checked.
    pub async fn confirm_bundle(&self, bundle: &Bundle) -> bool {
        let signatures = match self.settings.mode {
            ConfirmationMode::FeeOnly => vec![bundle.fee_signature()],
            ConfirmationMode::AllSignatures => bundle.signatures(),
        };
        let deadline = Instant::now() + self.settings.timeout;

        for signature in &signatures {
            let status = self.await_signature_until(signature, deadline).await;
            match &status {
                ConfirmationStatus::Landed => {
                    tracing::info!(signature = %signature, "Transaction confirmed");
                }
                ConfirmationStatus::Failed(err) => {
                    tracing::warn!(signature = %signature, error = %err, "Transaction failed on chain");
                    return false;
                }
                ConfirmationStatus::TimedOut => {
                    tracing::warn!(
                        signature = %signature,
                        timeout_ms = self.settings.timeout.as_millis() as u64,
                        "Timed out waiting for confirmation"
                    );
                    return false;
                }
            }
        }
        true
    }
}
