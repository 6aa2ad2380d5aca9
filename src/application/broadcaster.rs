//! Relay Broadcaster
//!
//! Sends one encoded bundle to every configured relay endpoint at once.
//! Every request runs to completion; one endpoint failing never cancels
//! the others.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;

use crate::domain::EndpointOutcome;
use crate::ports::RelayPort;

/// Aggregated result of a fan-out
#[derive(Debug, Clone, Default)]
pub struct BroadcastReport {
    /// One outcome per endpoint, in endpoint order
    pub outcomes: Vec<EndpointOutcome>,
    /// Bundle ID from a successful endpoint (advisory)
    pub bundle_id: Option<String>,
}

impl BroadcastReport {
    /// At least one relay accepted the bundle
    pub fn accepted(&self) -> bool {
        self.outcomes.iter().any(EndpointOutcome::is_success)
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }
}

pub struct RelayBroadcaster {
    relay: Arc<dyn RelayPort>,
    endpoints: Vec<String>,
}

impl RelayBroadcaster {
    pub fn new(relay: Arc<dyn RelayPort>, endpoints: Vec<String>) -> Self {
        Self { relay, endpoints }
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Send `transactions` to all endpoints concurrently and collect outcomes
    pub async fn broadcast(&self, transactions: &[String]) -> BroadcastReport {
        tracing::info!(
            endpoints = self.endpoints.len(),
            transactions = transactions.len(),
            "Sending bundle to relays"
        );

        let requests = self.endpoints.iter().map(|endpoint| async move {
            let start = Instant::now();
            let result = self.relay.send_bundle(endpoint, transactions).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(bundle_id) => {
                    tracing::info!(endpoint = %endpoint, bundle_id = %bundle_id, elapsed_ms, "Relay accepted bundle");
                }
                Err(err) => {
                    tracing::warn!(endpoint = %endpoint, error = %err, elapsed_ms, "Relay request failed");
                }
            }

            EndpointOutcome {
                endpoint: endpoint.clone(),
                result: result.map_err(|e| e.to_string()),
                elapsed_ms,
            }
        });

        let outcomes = join_all(requests).await;

        // Any successful ID will do; the last one wins
        let bundle_id = outcomes
            .iter()
            .filter_map(EndpointOutcome::bundle_id)
            .last()
            .map(str::to_string);

        let report = BroadcastReport { outcomes, bundle_id };
        tracing::info!(
            accepted = report.success_count(),
            failed = report.outcomes.len() - report.success_count(),
            bundle_id = report.bundle_id.as_deref().unwrap_or(""),
            "Relay broadcast finished"
        );
        report
    }
}
