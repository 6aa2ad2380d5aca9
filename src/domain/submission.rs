//! Submission Outcomes
//!
//! Records produced by a bundle submission. Per-endpoint outcomes live only
//! long enough to decide whether the bundle was accepted.

use serde::Serialize;

/// Result of a single relay endpoint call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointOutcome {
    /// Endpoint URL
    pub endpoint: String,
    /// Bundle ID on success, error text on failure
    pub result: Result<String, String>,
    /// Request latency in milliseconds
    pub elapsed_ms: u64,
}

impl EndpointOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn bundle_id(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }
}

/// Final outcome handed back to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    /// Fee transaction (and so the bundle) landed
    pub confirmed: bool,
    /// Base58 fee transaction signature
    pub fee_tx_signature: Option<String>,
    /// Relay-assigned bundle ID (advisory)
    pub bundle_id: Option<String>,
}

impl SubmissionResult {
    /// No relay accepted the bundle
    pub fn rejected() -> Self {
        Self::default()
    }

    /// Relay accepted the bundle; `confirmed` reflects the ledger check
    pub fn accepted(confirmed: bool, fee_tx_signature: String, bundle_id: Option<String>) -> Self {
        Self {
            confirmed,
            fee_tx_signature: Some(fee_tx_signature),
            bundle_id,
        }
    }
}
