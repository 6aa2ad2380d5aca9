//! Bundle Construction
//!
//! Builds the leading fee transaction and orders it ahead of the caller's
//! transactions. Nothing here touches the network; the blockhash is passed in.

use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
    transaction::VersionedTransaction,
};

use super::error::BundleError;
use super::tip::tip_instruction;

/// Maximum transactions a Jito block engine accepts in one bundle
pub const MAX_BUNDLE_SIZE: usize = 5;

/// Extra transfer to a treasury account, paid inside the fee transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasuryFee {
    pub account: Pubkey,
    pub lamports: u64,
}

/// Everything needed to build the fee transaction
#[derive(Debug, Clone)]
pub struct FeeTransactionPlan {
    /// Fee payer and tip sender
    pub payer: Pubkey,
    /// Selected relay tip account
    pub tip_account: Pubkey,
    /// Tip amount in lamports
    pub tip_lamports: u64,
    /// Optional treasury transfer
    pub treasury: Option<TreasuryFee>,
    /// Instructions placed after the tip (e.g. an unsent setup transaction)
    pub prepended: Vec<Instruction>,
}

impl FeeTransactionPlan {
    pub fn new(payer: Pubkey, tip_account: Pubkey, tip_lamports: u64) -> Self {
        Self {
            payer,
            tip_account,
            tip_lamports,
            treasury: None,
            prepended: Vec::new(),
        }
    }

    pub fn with_treasury(mut self, treasury: Option<TreasuryFee>) -> Self {
        self.treasury = treasury;
        self
    }

    pub fn with_prepended(mut self, instructions: Vec<Instruction>) -> Self {
        self.prepended = instructions;
        self
    }

    /// Instructions in execution order: tip, treasury, prepended
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut instructions = Vec::with_capacity(2 + self.prepended.len());
        instructions.push(tip_instruction(&self.payer, &self.tip_account, self.tip_lamports));

        if let Some(treasury) = self.treasury {
            instructions.push(system_instruction::transfer(
                &self.payer,
                &treasury.account,
                treasury.lamports,
            ));
        }

        instructions.extend(self.prepended.iter().cloned());
        instructions
    }

    /// Accounts that must sign the fee transaction, payer first
    pub fn required_signers(&self) -> Vec<Pubkey> {
        required_signers(&self.payer, &self.instructions())
    }
}

/// Collect the distinct signer accounts of `instructions`, payer first
pub fn required_signers(payer: &Pubkey, instructions: &[Instruction]) -> Vec<Pubkey> {
    let mut signers = vec![*payer];
    for meta in instructions.iter().flat_map(|ix| ix.accounts.iter()) {
        if meta.is_signer && !signers.contains(&meta.pubkey) {
            signers.push(meta.pubkey);
        }
    }
    signers
}

/// Check every required signer has a keypair, without touching the network
pub fn check_signers(plan: &FeeTransactionPlan, signers: &[&Keypair]) -> Result<(), BundleError> {
    for required in plan.required_signers() {
        if !signers.iter().any(|s| s.pubkey() == required) {
            return Err(BundleError::MissingSigner(required));
        }
    }
    Ok(())
}

/// Compile and sign the fee transaction as a v0 message
///
/// Signers are matched to the message's signer order; extra or duplicate
/// keypairs are ignored.
pub fn sign_fee_transaction(
    plan: &FeeTransactionPlan,
    blockhash: Hash,
    signers: &[&Keypair],
) -> Result<VersionedTransaction, BundleError> {
    if plan.tip_lamports == 0 {
        return Err(BundleError::ZeroTip);
    }

    let instructions = plan.instructions();
    let message = v0::Message::try_compile(&plan.payer, &instructions, &[], blockhash)
        .map_err(|e| BundleError::Compile(e.to_string()))?;

    let num_required = message.header.num_required_signatures as usize;
    let ordered: Vec<&Keypair> = message.account_keys[..num_required]
        .iter()
        .map(|key| {
            signers
                .iter()
                .find(|s| s.pubkey() == *key)
                .copied()
                .ok_or(BundleError::MissingSigner(*key))
        })
        .collect::<Result<_, _>>()?;

    VersionedTransaction::try_new(VersionedMessage::V0(message), ordered.as_slice())
        .map_err(|e| BundleError::Signing(e.to_string()))
}

/// Ordered set of transactions, fee transaction first
#[derive(Debug, Clone)]
pub struct Bundle {
    transactions: Vec<VersionedTransaction>,
}

impl Bundle {
    /// Place `fee_transaction` ahead of `transactions`, keeping caller order
    pub fn new(
        fee_transaction: VersionedTransaction,
        transactions: Vec<VersionedTransaction>,
        max_len: usize,
    ) -> Result<Self, BundleError> {
        let len = transactions.len() + 1;
        if len > max_len {
            return Err(BundleError::BundleTooLarge { len, max: max_len });
        }

        let mut ordered = Vec::with_capacity(len);
        ordered.push(fee_transaction);
        ordered.extend(transactions);
        Ok(Self { transactions: ordered })
    }

    pub fn fee_transaction(&self) -> &VersionedTransaction {
        &self.transactions[0]
    }

    /// Signature identifying the fee transaction
    pub fn fee_signature(&self) -> Signature {
        self.fee_transaction()
            .signatures
            .first()
            .copied()
            .unwrap_or_default()
    }

    /// All transactions, fee transaction first
    pub fn transactions(&self) -> &[VersionedTransaction] {
        &self.transactions
    }

    /// First signature of every transaction, in bundle order
    pub fn signatures(&self) -> Vec<Signature> {
        self.transactions
            .iter()
            .map(|tx| tx.signatures.first().copied().unwrap_or_default())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
