//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Solana: ledger RPC client
//! - Jito: block engine bundle submission

pub mod solana;
pub mod jito;

pub use solana::SolanaClient;
pub use jito::{JitoConfig, JitoRelayClient};
