//! Transaction Encoding
//!
//! Wire-format transactions as text for the block engine's JSON-RPC API.
//! Only fully signed transactions are encoded.

use base64::Engine;
use serde::Deserialize;
use solana_sdk::{packet::PACKET_DATA_SIZE, signature::Signature, transaction::VersionedTransaction};

use super::bundle::Bundle;
use super::error::BundleError;

/// Text encoding accepted by `sendBundle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionEncoding {
    #[default]
    Base58,
    Base64,
}

impl TransactionEncoding {
    /// Name used in the JSON-RPC `encoding` option
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionEncoding::Base58 => "base58",
            TransactionEncoding::Base64 => "base64",
        }
    }

    fn encode_bytes(&self, bytes: &[u8]) -> String {
        match self {
            TransactionEncoding::Base58 => bs58::encode(bytes).into_string(),
            TransactionEncoding::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    fn decode_bytes(&self, encoded: &str) -> Result<Vec<u8>, BundleError> {
        match self {
            TransactionEncoding::Base58 => bs58::decode(encoded)
                .into_vec()
                .map_err(|e| BundleError::Serialization(e.to_string())),
            TransactionEncoding::Base64 => base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| BundleError::Serialization(e.to_string())),
        }
    }
}

/// Check a transaction carries every signature its message requires
pub fn is_fully_signed(tx: &VersionedTransaction) -> bool {
    let required = tx.message.header().num_required_signatures as usize;
    required > 0
        && tx.signatures.len() == required
        && tx.signatures.iter().all(|sig| *sig != Signature::default())
}

/// Encode one transaction; `index` is its bundle position for error reporting
pub fn encode_transaction(
    tx: &VersionedTransaction,
    index: usize,
    encoding: TransactionEncoding,
) -> Result<String, BundleError> {
    if !is_fully_signed(tx) {
        return Err(BundleError::Unsigned { index });
    }

    let bytes = bincode::serialize(tx)?;
    if bytes.len() > PACKET_DATA_SIZE {
        return Err(BundleError::TransactionTooLarge {
            index,
            size: bytes.len(),
            limit: PACKET_DATA_SIZE,
        });
    }

    Ok(encoding.encode_bytes(&bytes))
}

/// Encode every transaction of the bundle, keeping bundle order
pub fn encode_bundle(
    bundle: &Bundle,
    encoding: TransactionEncoding,
) -> Result<Vec<String>, BundleError> {
    bundle
        .transactions()
        .iter()
        .enumerate()
        .map(|(index, tx)| encode_transaction(tx, index, encoding))
        .collect()
}

/// Decode a transaction produced by [`encode_transaction`]
pub fn decode_transaction(
    encoded: &str,
    encoding: TransactionEncoding,
) -> Result<VersionedTransaction, BundleError> {
    let bytes = encoding.decode_bytes(encoded)?;
    Ok(bincode::deserialize(&bytes)?)
}
