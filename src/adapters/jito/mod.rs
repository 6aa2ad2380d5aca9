//! Jito Bundle Adapter
//!
//! Atomic multi-transaction bundles via the Jito Block Engine.

mod client;
mod config;
mod types;

pub use client::JitoRelayClient;
pub use config::{endpoints, JitoConfig};
pub use types::{BundleRequest, JsonRpcError, JsonRpcResponse};
