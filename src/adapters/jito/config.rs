//! Jito Configuration
//!
//! HTTP settings for Jito Block Engine requests. Which endpoints receive a
//! bundle, the tip and the bundle size limit belong to the submitter.

use std::time::Duration;

use crate::domain::TransactionEncoding;

/// Jito Block Engine bundle endpoints
pub mod endpoints {
    /// Mainnet block engine (Amsterdam)
    pub const MAINNET_AMSTERDAM: &str = "https://amsterdam.mainnet.block-engine.jito.wtf/api/v1/bundles";
    /// Mainnet block engine (Frankfurt)
    pub const MAINNET_FRANKFURT: &str = "https://frankfurt.mainnet.block-engine.jito.wtf/api/v1/bundles";
    /// Mainnet block engine (New York)
    pub const MAINNET_NY: &str = "https://ny.mainnet.block-engine.jito.wtf/api/v1/bundles";
    /// Mainnet block engine (Tokyo)
    pub const MAINNET_TOKYO: &str = "https://tokyo.mainnet.block-engine.jito.wtf/api/v1/bundles";
    /// Global mainnet block engine
    pub const MAINNET_GLOBAL: &str = "https://mainnet.block-engine.jito.wtf/api/v1/bundles";
    /// Default mainnet endpoint
    pub const MAINNET_DEFAULT: &str = MAINNET_NY;

    /// Every mainnet cluster, for redundant fan-out
    pub const MAINNET_ALL: &[&str] = &[
        MAINNET_NY,
        MAINNET_GLOBAL,
        MAINNET_AMSTERDAM,
        MAINNET_FRANKFURT,
        MAINNET_TOKYO,
    ];
}

/// Jito Block Engine client configuration
#[derive(Debug, Clone)]
pub struct JitoConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Transaction text encoding declared in `sendBundle`
    pub encoding: TransactionEncoding,
    /// Optional auth token for authenticated requests
    pub auth_token: Option<String>,
}

impl Default for JitoConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            encoding: TransactionEncoding::Base58,
            auth_token: None,
        }
    }
}

impl JitoConfig {
    /// Set transaction encoding
    pub fn with_encoding(mut self, encoding: TransactionEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set auth token
    pub fn with_auth_token(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
