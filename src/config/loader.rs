//! Configuration Loader
//!
//! Loads and validates bundler configuration from TOML files.

use serde::Deserialize;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::jito::{endpoints, JitoConfig};
use crate::adapters::solana::SolanaClient;
use crate::application::{ConfirmationMode, ConfirmationSettings, SubmitterSettings};
use crate::domain::{TransactionEncoding, TreasuryFee, MAX_BUNDLE_SIZE};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct BundlerConfig {
    pub jito: JitoSection,
    pub solana: SolanaSection,
    #[serde(default)]
    pub confirmation: ConfirmationSection,
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub treasury: TreasurySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Jito block engine section
#[derive(Debug, Clone, Deserialize)]
pub struct JitoSection {
    /// Bundle endpoint URLs; every one receives each bundle
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,
    /// Tip paid to the relay, in lamports
    pub tip_lamports: u64,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum transactions per bundle (Jito allows 5)
    #[serde(default = "default_max_bundle_size")]
    pub max_bundle_size: usize,
    /// "base58" or "base64"
    #[serde(default)]
    pub encoding: TransactionEncoding,
    /// Optional block engine auth token
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl JitoSection {
    /// Get auth token with environment variable fallback
    /// Checks JITO_AUTH_TOKEN env var if config value is empty/None
    pub fn get_auth_token(&self) -> Option<String> {
        if let Some(ref token) = self.auth_token {
            if !token.is_empty() {
                return Some(token.clone());
            }
        }
        std::env::var("JITO_AUTH_TOKEN").ok()
    }
}

/// Solana RPC configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct SolanaSection {
    /// RPC endpoint
    pub rpc_url: String,
    /// Blockhash commitment for plain bundles
    #[serde(default = "default_commitment")]
    pub commitment: String,
    /// Blockhash commitment when setup instructions are prepended
    #[serde(default = "default_setup_commitment")]
    pub setup_commitment: String,
}

impl SolanaSection {
    /// Get RPC URL with environment variable override
    /// Checks SOLANA_RPC_URL env var first, falls back to config value
    pub fn get_rpc_url(&self) -> String {
        std::env::var("SOLANA_RPC_URL").unwrap_or_else(|_| self.rpc_url.clone())
    }
}

/// Ledger confirmation section
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmationSection {
    #[serde(default = "default_commitment")]
    pub commitment: String,
    #[serde(default = "default_confirm_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// "fee_only" or "all_signatures"
    #[serde(default)]
    pub mode: ConfirmationMode,
}

impl Default for ConfirmationSection {
    fn default() -> Self {
        Self {
            commitment: default_commitment(),
            timeout_ms: default_confirm_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            mode: ConfirmationMode::default(),
        }
    }
}

/// Diagnostic simulation section
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Treasury fee section (optional, off by default)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TreasurySection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub fee_lamports: u64,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_endpoints() -> Vec<String> {
    vec![endpoints::MAINNET_DEFAULT.to_string()]
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_max_bundle_size() -> usize {
    MAX_BUNDLE_SIZE
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_setup_commitment() -> String {
    "finalized".to_string()
}

fn default_confirm_timeout_ms() -> u64 {
    60_000
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Parse a commitment name
pub fn parse_commitment(name: &str) -> Result<CommitmentConfig, ConfigError> {
    match name.to_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(ConfigError::ValidationError(format!(
            "unknown commitment level '{}'",
            other
        ))),
    }
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BundlerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: BundlerConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl BundlerConfig {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate Jito
        if self.jito.endpoints.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one relay endpoint is required".to_string(),
            ));
        }

        if let Some(bad) = self
            .jito
            .endpoints
            .iter()
            .find(|e| !(e.starts_with("http://") || e.starts_with("https://")))
        {
            return Err(ConfigError::ValidationError(format!(
                "relay endpoint must be an http(s) URL, got '{}'",
                bad
            )));
        }

        if self.jito.tip_lamports == 0 {
            return Err(ConfigError::ValidationError(
                "tip_lamports must be > 0".to_string(),
            ));
        }

        if self.jito.max_bundle_size == 0 || self.jito.max_bundle_size > MAX_BUNDLE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "max_bundle_size must be 1-{}, got {}",
                MAX_BUNDLE_SIZE, self.jito.max_bundle_size
            )));
        }

        if self.jito.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "jito timeout_ms must be > 0".to_string(),
            ));
        }

        // Validate Solana
        if self.solana.rpc_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "rpc_url cannot be empty".to_string(),
            ));
        }

        parse_commitment(&self.solana.commitment)?;
        parse_commitment(&self.solana.setup_commitment)?;

        // Validate confirmation
        parse_commitment(&self.confirmation.commitment)?;

        if self.confirmation.timeout_ms == 0 || self.confirmation.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "confirmation timeout_ms and poll_interval_ms must be > 0".to_string(),
            ));
        }

        // Validate treasury
        if self.treasury.enabled {
            Pubkey::from_str(&self.treasury.address).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "invalid treasury address '{}': {}",
                    self.treasury.address, e
                ))
            })?;

            if self.treasury.fee_lamports == 0 {
                return Err(ConfigError::ValidationError(
                    "treasury fee_lamports must be > 0 when enabled".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Treasury transfer, if enabled
    pub fn treasury_fee(&self) -> Option<TreasuryFee> {
        if !self.treasury.enabled {
            return None;
        }
        Pubkey::from_str(&self.treasury.address)
            .ok()
            .map(|account| TreasuryFee {
                account,
                lamports: self.treasury.fee_lamports,
            })
    }
}

impl From<&BundlerConfig> for JitoConfig {
    fn from(config: &BundlerConfig) -> Self {
        JitoConfig {
            timeout: Duration::from_millis(config.jito.timeout_ms),
            encoding: config.jito.encoding,
            auth_token: config.jito.get_auth_token(),
        }
    }
}

impl From<&BundlerConfig> for SolanaClient {
    fn from(config: &BundlerConfig) -> Self {
        // Commitment was checked by validate()
        let commitment = parse_commitment(&config.solana.commitment).unwrap_or_default();
        SolanaClient::new_with_commitment(config.solana.get_rpc_url(), commitment)
    }
}

impl From<&BundlerConfig> for SubmitterSettings {
    fn from(config: &BundlerConfig) -> Self {
        // Commitments were checked by validate()
        let commitment = |name: &str| parse_commitment(name).unwrap_or_default();

        SubmitterSettings {
            endpoints: config.jito.endpoints.clone(),
            tip_lamports: config.jito.tip_lamports,
            treasury: config.treasury_fee(),
            max_bundle_size: config.jito.max_bundle_size,
            encoding: config.jito.encoding,
            commitment: commitment(&config.solana.commitment),
            setup_commitment: commitment(&config.solana.setup_commitment),
            simulate: config.simulation.enabled,
            confirmation: ConfirmationSettings {
                commitment: commitment(&config.confirmation.commitment),
                timeout: Duration::from_millis(config.confirmation.timeout_ms),
                poll_interval: Duration::from_millis(config.confirmation.poll_interval_ms),
                mode: config.confirmation.mode,
            },
        }
    }
}
