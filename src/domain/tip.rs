//! Tip Accounts
//!
//! Jito block engines accept validator tips on a fixed set of accounts.
//! One of them is picked uniformly at random for every bundle so relay load
//! is spread across the pool.

use rand::Rng;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use std::str::FromStr;

use super::error::BundleError;

/// Jito validator tip accounts (8 official accounts)
pub const JITO_TIP_ACCOUNTS: &[&str] = &[
    "96gYZGLnJYVFmbjzopPSU6QiEV5fGqZNyN9nmNhvrZU5",
    "HFqU5x63VTqvQss8hp11i4wVV8bD44PvwucfZ2bU7gRe",
    "Cw8CFyM9FkoMi7K7Crf6HNQqf4uEMzpKw6QNghXLvLkY",
    "ADaUMid9yfUytqMBgopwjb2DTLSokTSzL1zt6iGPaS49",
    "DfXygSm4jCyNCybVYYK6DwvWqjKee8pbDmJGcLWNDXjh",
    "ADuUkR4vqLUMWXxW9gh6D6L8pMSawimctcNZ5pGwDcEt",
    "DttWaMuVvTiduZRnguLF7jNxTgiMBZ1hyAumKUiL2KRL",
    "3AVi9Tg9Uo68tJfuvoKvqKNWKkC5wPdSSdeBnizKZ6jT",
];

/// Pick one account from `pool` uniformly at random
///
/// Returns `None` only for an empty pool.
pub fn select_tip_account<R: Rng + ?Sized>(pool: &[Pubkey], rng: &mut R) -> Option<Pubkey> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())])
}

/// Build the tip transfer from `payer` to `tip_account`
pub fn tip_instruction(payer: &Pubkey, tip_account: &Pubkey, lamports: u64) -> Instruction {
    system_instruction::transfer(payer, tip_account, lamports)
}

/// Non-empty set of relay tip accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipPool {
    accounts: Vec<Pubkey>,
}

impl TipPool {
    /// Create a pool from explicit accounts
    pub fn new(accounts: Vec<Pubkey>) -> Result<Self, BundleError> {
        if accounts.is_empty() {
            return Err(BundleError::EmptyTipPool);
        }
        Ok(Self { accounts })
    }

    /// The official Jito mainnet tip accounts
    pub fn jito_mainnet() -> Self {
        let accounts = JITO_TIP_ACCOUNTS
            .iter()
            .filter_map(|s| Pubkey::from_str(s).ok())
            .collect();
        Self { accounts }
    }

    /// Select a tip account with the thread-local RNG
    pub fn select(&self) -> Pubkey {
        self.select_with(&mut rand::thread_rng())
    }

    /// Select a tip account with the given RNG
    pub fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Pubkey {
        // Pool is non-empty by construction, so the default is never used
        select_tip_account(&self.accounts, rng).unwrap_or_default()
    }

    pub fn contains(&self, pubkey: &Pubkey) -> bool {
        self.accounts.contains(pubkey)
    }

    pub fn accounts(&self) -> &[Pubkey] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for TipPool {
    fn default() -> Self {
        Self::jito_mainnet()
    }
}
