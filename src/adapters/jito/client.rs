//! Jito Relay Client
//!
//! HTTP client for the Jito Block Engine `sendBundle` API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::ports::relay::{RelayError, RelayPort};

use super::config::JitoConfig;
use super::types::{BundleRequest, JsonRpcResponse};

/// Header carrying the block engine auth token
const AUTH_HEADER: &str = "x-jito-auth";

/// Jito Block Engine client for bundle submission
#[derive(Debug, Clone)]
pub struct JitoRelayClient {
    /// Client configuration
    config: JitoConfig,
    /// HTTP client
    http: Client,
}

impl JitoRelayClient {
    /// Create a new Jito client with default configuration
    pub fn new() -> Result<Self, RelayError> {
        Self::with_config(JitoConfig::default())
    }

    /// Create a new Jito client with custom configuration
    pub fn with_config(config: JitoConfig) -> Result<Self, RelayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &JitoConfig {
        &self.config
    }

    /// Turn an HTTP response into a bundle ID or an endpoint error
    fn parse_response(status: StatusCode, body: &str) -> Result<String, RelayError> {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RelayError::RateLimited);
        }

        // Rejected bundles come back as non-2xx with a JSON-RPC error body
        let rpc_response = match serde_json::from_str::<JsonRpcResponse<String>>(body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(RelayError::HttpStatus {
                    status: status.as_u16(),
                    body: body.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = rpc_response.error {
            return Err(RelayError::ApiError {
                code: error.code,
                message: error.message,
            });
        }

        if !status.is_success() {
            return Err(RelayError::HttpStatus {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }

        rpc_response.result.ok_or(RelayError::MissingBundleId)
    }
}

#[async_trait]
impl RelayPort for JitoRelayClient {
    async fn send_bundle(&self, endpoint: &str, transactions: &[String]) -> Result<String, RelayError> {
        let request = BundleRequest::new(transactions, self.config.encoding);

        let mut req_builder = self
            .http
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(&request);

        if let Some(ref token) = self.config.auth_token {
            req_builder = req_builder.header(AUTH_HEADER, token);
        }

        let response = req_builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Self::parse_response(status, &body)
    }
}
