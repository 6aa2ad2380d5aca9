//! Bundle Error Types
//!
//! Conditions that prevent a bundle from being built. Anything raised here
//! stops the submission before a single relay request is sent.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Errors that abort bundle construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// Recent blockhash could not be fetched
    #[error("Failed to fetch recent blockhash: {0}")]
    BlockhashFetch(String),

    /// A signer required by the fee transaction was not supplied
    #[error("Missing required signer: {0}")]
    MissingSigner(Pubkey),

    /// Signing the fee transaction failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Fee transaction message could not be compiled
    #[error("Failed to compile fee transaction: {0}")]
    Compile(String),

    /// Transaction is not fully signed
    #[error("Transaction {index} is not fully signed")]
    Unsigned { index: usize },

    /// Transaction serializes above the packet limit
    #[error("Transaction {index} is {size} bytes, limit is {limit}")]
    TransactionTooLarge {
        index: usize,
        size: usize,
        limit: usize,
    },

    /// Transaction bytes could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Bundle exceeds the relay transaction limit
    #[error("Bundle has {len} transactions, relay limit is {max}")]
    BundleTooLarge { len: usize, max: usize },

    /// Tip pool has no accounts
    #[error("Tip account pool cannot be empty")]
    EmptyTipPool,

    /// Tip amount is zero
    #[error("Tip amount cannot be zero")]
    ZeroTip,
}

impl BundleError {
    /// Check if the error was raised while signing
    pub fn is_signing_error(&self) -> bool {
        matches!(
            self,
            BundleError::MissingSigner(_) | BundleError::Signing(_)
        )
    }

    /// Check if the error was raised while serializing
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            BundleError::Unsigned { .. }
                | BundleError::TransactionTooLarge { .. }
                | BundleError::Serialization(_)
        )
    }
}

impl From<bincode::Error> for BundleError {
    fn from(err: bincode::Error) -> Self {
        BundleError::Serialization(err.to_string())
    }
}
