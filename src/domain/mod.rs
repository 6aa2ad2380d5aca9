//! Domain Layer - Bundle construction logic
//!
//! Pure types and functions with no network access. The ledger and relays
//! are reached only through the ports layer.
//!
//! - `tip`: relay tip account pool and random selection
//! - `bundle`: fee transaction construction, signing, bundle ordering
//! - `encoding`: text encoding of signed transactions
//! - `submission`: per-endpoint and final submission outcomes

pub mod error;
pub mod tip;
pub mod bundle;
pub mod encoding;
pub mod submission;

pub use error::BundleError;
pub use tip::{select_tip_account, tip_instruction, TipPool, JITO_TIP_ACCOUNTS};
pub use bundle::{
    check_signers, required_signers, sign_fee_transaction, Bundle, FeeTransactionPlan,
    TreasuryFee, MAX_BUNDLE_SIZE,
};
pub use encoding::{
    decode_transaction, encode_bundle, encode_transaction, is_fully_signed, TransactionEncoding,
};
pub use submission::{EndpointOutcome, SubmissionResult};
