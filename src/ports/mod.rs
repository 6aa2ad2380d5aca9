//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement:
//! - Ledger RPC (blockhash, simulation, signature status)
//! - Relay endpoints (bundle submission)

pub mod ledger;
pub mod relay;
pub mod mocks;

pub use ledger::{LedgerError, LedgerPort, SignatureStatus, SimulationReport};
pub use relay::{RelayError, RelayPort};
