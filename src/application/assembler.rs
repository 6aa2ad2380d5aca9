//! Bundle Assembler
//!
//! Fetches a blockhash, builds and signs the fee transaction, and places it
//! ahead of the caller's transactions.

use std::sync::Arc;

use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    signature::{Keypair, Signer},
    transaction::VersionedTransaction,
};

use crate::domain::{
    check_signers, sign_fee_transaction, Bundle, BundleError, FeeTransactionPlan, TipPool,
    TreasuryFee,
};
use crate::ports::LedgerPort;

/// Inputs for one bundle
pub struct AssemblyRequest<'a> {
    /// Fee payer, always a signer
    pub payer: &'a Keypair,
    /// Authorities required by the prepended instructions
    pub extra_signers: &'a [&'a Keypair],
    /// Instructions placed in the fee transaction after the tip
    pub prepended: Vec<Instruction>,
    /// Caller transactions, already signed, in execution order
    pub transactions: Vec<VersionedTransaction>,
    /// Commitment for the blockhash
    pub commitment: CommitmentConfig,
}

pub struct BundleAssembler {
    ledger: Arc<dyn LedgerPort>,
    tip_pool: TipPool,
    tip_lamports: u64,
    treasury: Option<TreasuryFee>,
    max_bundle_size: usize,
}

impl BundleAssembler {
    pub fn new(ledger: Arc<dyn LedgerPort>, tip_lamports: u64, max_bundle_size: usize) -> Self {
        Self {
            ledger,
            tip_pool: TipPool::jito_mainnet(),
            tip_lamports,
            treasury: None,
            max_bundle_size,
        }
    }

    pub fn with_tip_pool(mut self, tip_pool: TipPool) -> Self {
        self.tip_pool = tip_pool;
        self
    }

    pub fn with_treasury(mut self, treasury: Option<TreasuryFee>) -> Self {
        self.treasury = treasury;
        self
    }

    pub fn tip_pool(&self) -> &TipPool {
        &self.tip_pool
    }

    /// Build the signed bundle
    ///
    /// Size, tip and signer checks run before the blockhash request, so a
    /// bundle that cannot be signed never reaches the network.
    pub async fn assemble(&self, request: AssemblyRequest<'_>) -> Result<Bundle, BundleError> {
        let len = request.transactions.len() + 1;
        if len > self.max_bundle_size {
            return Err(BundleError::BundleTooLarge {
                len,
                max: self.max_bundle_size,
            });
        }
        if self.tip_lamports == 0 {
            return Err(BundleError::ZeroTip);
        }

        let tip_account = self.tip_pool.select();
        let plan = FeeTransactionPlan::new(request.payer.pubkey(), tip_account, self.tip_lamports)
            .with_treasury(self.treasury)
            .with_prepended(request.prepended);

        let mut signers: Vec<&Keypair> = Vec::with_capacity(1 + request.extra_signers.len());
        signers.push(request.payer);
        signers.extend(request.extra_signers.iter().copied());
        check_signers(&plan, &signers)?;

        tracing::info!(
            tip_account = %tip_account,
            tip_lamports = self.tip_lamports,
            treasury = self.treasury.is_some(),
            prepended = plan.prepended.len(),
            "Paying bundle tip"
        );

        let blockhash = self
            .ledger
            .get_latest_blockhash(request.commitment)
            .await
            .map_err(|e| BundleError::BlockhashFetch(e.to_string()))?;

        let fee_transaction = sign_fee_transaction(&plan, blockhash, &signers)?;
        Bundle::new(fee_transaction, request.transactions, self.max_bundle_size)
    }
}
