//! Jito Bundler - Atomic bundle submission for Solana
//!
//! Wraps caller-signed transactions in a Jito bundle behind a tip
//! transaction, broadcasts it to every configured block engine at once and
//! reports whether it landed.
//!
//! # Modules
//!
//! - `domain`: Core logic (tip selection, fee transaction, bundle, encoding)
//! - `ports`: Trait abstractions (LedgerPort, RelayPort) and mocks
//! - `adapters`: External implementations (Solana RPC, Jito block engine)
//! - `application`: Assembly, broadcast, confirmation and the submitter
//! - `config`: Configuration loading and validation
//! - `logging`: Tracing subscriber setup

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod application;
pub mod config;
pub mod logging;

pub use application::{BundleSubmitter, SubmitterSettings};
pub use domain::{BundleError, SubmissionResult};
