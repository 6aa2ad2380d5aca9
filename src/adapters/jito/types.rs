//! Jito Bundle Types
//!
//! Request and response types for the Jito Block Engine API.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::TransactionEncoding;

/// Bundle submission request (JSON-RPC format)
#[derive(Debug, Clone, Serialize)]
pub struct BundleRequest {
    /// JSON-RPC version
    pub jsonrpc: String,
    /// Request ID
    pub id: u64,
    /// Method name
    pub method: String,
    /// Encoded transactions, then an optional options object
    pub params: Vec<Value>,
}

impl BundleRequest {
    /// Create a `sendBundle` request
    ///
    /// Base58 needs no options object; base64 must be declared.
    pub fn new(transactions: &[String], encoding: TransactionEncoding) -> Self {
        let mut params = vec![json!(transactions)];
        if encoding != TransactionEncoding::Base58 {
            params.push(json!({ "encoding": encoding.as_str() }));
        }

        Self {
            jsonrpc: "2.0".to_string(),
            id: 1,
            method: "sendBundle".to_string(),
            params,
        }
    }
}

/// JSON-RPC response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse<T> {
    /// JSON-RPC version
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Response ID
    #[serde(default)]
    pub id: Option<Value>,
    /// Result (if success)
    pub result: Option<T>,
    /// Error (if failure)
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Additional error data
    #[serde(default)]
    pub data: Option<Value>,
}
