//! Bundle Submitter
//!
//! Runs one submission end to end: assemble, encode, simulate, broadcast,
//! confirm. Invalid input (missing signer, unsigned or oversized
//! transaction) and signing failures are returned as errors. A missing
//! blockhash, relay failures and confirmation problems come back as an
//! unconfirmed [`SubmissionResult`].

use std::sync::Arc;

use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    signature::Keypair,
    transaction::VersionedTransaction,
};

use crate::domain::{
    encode_bundle, Bundle, BundleError, SubmissionResult, TipPool, TransactionEncoding,
    TreasuryFee, MAX_BUNDLE_SIZE,
};
use crate::ports::{LedgerPort, RelayPort};

use super::assembler::{AssemblyRequest, BundleAssembler};
use super::broadcaster::RelayBroadcaster;
use super::confirmation::{ConfirmationChecker, ConfirmationSettings};

/// Tunables shared by every submission
#[derive(Debug, Clone)]
pub struct SubmitterSettings {
    /// Relay endpoint URLs
    pub endpoints: Vec<String>,
    /// Tip amount in lamports
    pub tip_lamports: u64,
    /// Optional treasury transfer added to the fee transaction
    pub treasury: Option<TreasuryFee>,
    /// Maximum transactions per bundle
    pub max_bundle_size: usize,
    /// Transaction text encoding
    pub encoding: TransactionEncoding,
    /// Blockhash commitment for plain bundles
    pub commitment: CommitmentConfig,
    /// Blockhash commitment when setup instructions are prepended
    pub setup_commitment: CommitmentConfig,
    /// Run diagnostic simulations before broadcasting
    pub simulate: bool,
    /// Ledger confirmation settings
    pub confirmation: ConfirmationSettings,
}

impl Default for SubmitterSettings {
    fn default() -> Self {
        Self {
            endpoints: vec![crate::adapters::jito::endpoints::MAINNET_DEFAULT.to_string()],
            tip_lamports: 10_000,
            treasury: None,
            max_bundle_size: MAX_BUNDLE_SIZE,
            encoding: TransactionEncoding::Base58,
            commitment: CommitmentConfig::confirmed(),
            setup_commitment: CommitmentConfig::finalized(),
            simulate: true,
            confirmation: ConfirmationSettings::default(),
        }
    }
}

/// One submission, covering both the plain and the setup path
pub struct SubmissionRequest<'a> {
    pub payer: &'a Keypair,
    pub extra_signers: &'a [&'a Keypair],
    pub setup_instructions: Vec<Instruction>,
    pub transactions: Vec<VersionedTransaction>,
    pub commitment: CommitmentConfig,
    /// Verify signatures during diagnostic simulation
    pub sig_verify: bool,
}

pub struct BundleSubmitter {
    ledger: Arc<dyn LedgerPort>,
    assembler: BundleAssembler,
    broadcaster: RelayBroadcaster,
    checker: ConfirmationChecker,
    settings: SubmitterSettings,
}

impl BundleSubmitter {
    pub fn new(
        ledger: Arc<dyn LedgerPort>,
        relay: Arc<dyn RelayPort>,
        settings: SubmitterSettings,
    ) -> Self {
        let assembler = BundleAssembler::new(
            Arc::clone(&ledger),
            settings.tip_lamports,
            settings.max_bundle_size,
        )
        .with_treasury(settings.treasury);
        let broadcaster = RelayBroadcaster::new(relay, settings.endpoints.clone());
        let checker = ConfirmationChecker::new(Arc::clone(&ledger), settings.confirmation.clone());

        Self {
            ledger,
            assembler,
            broadcaster,
            checker,
            settings,
        }
    }

    /// Replace the tip account pool
    pub fn with_tip_pool(mut self, tip_pool: TipPool) -> Self {
        self.assembler = self.assembler.with_tip_pool(tip_pool);
        self
    }

    pub fn settings(&self) -> &SubmitterSettings {
        &self.settings
    }

    /// Submit already-signed transactions behind a tip transaction
    pub async fn submit_sell_bundle(
        &self,
        transactions: Vec<VersionedTransaction>,
        payer: &Keypair,
    ) -> Result<SubmissionResult, BundleError> {
        self.submit(SubmissionRequest {
            payer,
            extra_signers: &[],
            setup_instructions: Vec::new(),
            transactions,
            commitment: self.settings.commitment,
            sig_verify: false,
        })
        .await
    }

    /// Submit with `setup_instructions` folded into the tip transaction
    ///
    /// `signers` must cover every authority the setup instructions need;
    /// the payer is always included.
    pub async fn submit_bundle_with_setup(
        &self,
        setup_instructions: Vec<Instruction>,
        signers: &[&Keypair],
        transactions: Vec<VersionedTransaction>,
        payer: &Keypair,
    ) -> Result<SubmissionResult, BundleError> {
        self.submit(SubmissionRequest {
            payer,
            extra_signers: signers,
            setup_instructions,
            transactions,
            commitment: self.settings.setup_commitment,
            sig_verify: true,
        })
        .await
    }

    pub async fn submit(&self, request: SubmissionRequest<'_>) -> Result<SubmissionResult, BundleError> {
        let sig_verify = request.sig_verify;
        tracing::info!(
            transactions = request.transactions.len(),
            setup_instructions = request.setup_instructions.len(),
            "Starting bundle submission"
        );

        let assembled = self
            .assembler
            .assemble(AssemblyRequest {
                payer: request.payer,
                extra_signers: request.extra_signers,
                prepended: request.setup_instructions,
                transactions: request.transactions,
                commitment: request.commitment,
            })
            .await;
        let bundle = match assembled {
            Ok(bundle) => bundle,
            Err(BundleError::BlockhashFetch(err)) => {
                tracing::warn!(error = %err, "No blockhash, bundle not built");
                return Ok(SubmissionResult::rejected());
            }
            Err(err) => return Err(err),
        };
        let encoded = encode_bundle(&bundle, self.settings.encoding)?;
        let fee_signature = bundle.fee_signature().to_string();

        if self.settings.simulate {
            self.simulate_bundle(&bundle, sig_verify).await;
        }

        let report = self.broadcaster.broadcast(&encoded).await;
        if !report.accepted() {
            tracing::warn!(fee_signature = %fee_signature, "No relay accepted the bundle");
            return Ok(SubmissionResult::rejected());
        }

        let confirmed = self.checker.confirm_bundle(&bundle).await;
        tracing::info!(
            confirmed,
            fee_signature = %fee_signature,
            bundle_id = report.bundle_id.as_deref().unwrap_or(""),
            "Bundle submission finished"
        );

        Ok(SubmissionResult::accepted(confirmed, fee_signature, report.bundle_id))
    }

    /// Log a simulation of every bundle transaction, fee transaction included; never fails
    async fn simulate_bundle(&self, bundle: &Bundle, sig_verify: bool) {
        for (index, tx) in bundle.transactions().iter().enumerate() {
            let signature = tx.signatures.first().copied().unwrap_or_default();
            match self.ledger.simulate_transaction(tx, sig_verify).await {
                Ok(report) if report.is_success() => {
                    tracing::debug!(
                        index,
                        signature = %signature,
                        units_consumed = report.units_consumed.unwrap_or(0),
                        "Simulation succeeded"
                    );
                }
                Ok(report) => {
                    tracing::warn!(
                        index,
                        signature = %signature,
                        error = report.err.as_deref().unwrap_or(""),
                        logs = ?report.logs,
                        "Simulation reported an error"
                    );
                }
                Err(err) => {
                    tracing::warn!(index, signature = %signature, error = %err, "Simulation request failed");
                }
            }
        }
    }
}
