//! Bundle submission integration tests
//!
//! Drive the full submitter against mock ledger and relay ports:
//! assembly, encoding, diagnostic simulation, fan-out and confirmation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
    transaction::VersionedTransaction,
};

use jito_bundler::application::{
    BundleSubmitter, ConfirmationMode, ConfirmationSettings, SubmitterSettings,
};
use jito_bundler::domain::{
    decode_transaction, BundleError, SubmissionResult, TipPool, TransactionEncoding, TreasuryFee,
};
use jito_bundler::ports::mocks::{MockLedger, MockRelay};
use jito_bundler::ports::{LedgerError, RelayError, SignatureStatus, SimulationReport};

const NY: &str = "https://ny.test/api/v1/bundles";
const AMS: &str = "https://ams.test/api/v1/bundles";
const TYO: &str = "https://tyo.test/api/v1/bundles";

// ============================================================================
// Test Fixtures
// ============================================================================

fn settings(endpoints: &[&str]) -> SubmitterSettings {
    SubmitterSettings {
        endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
        tip_lamports: 50_000,
        confirmation: ConfirmationSettings {
            timeout: Duration::from_millis(200),
            poll_interval: Duration::from_millis(10),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn signed_tx(payer: &Keypair, lamports: u64) -> VersionedTransaction {
    let ix = system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), lamports);
    let message = v0::Message::try_compile(&payer.pubkey(), &[ix], &[], Hash::new_unique()).unwrap();
    VersionedTransaction::try_new(VersionedMessage::V0(message), &[payer]).unwrap()
}

fn unsigned_tx(payer: &Keypair) -> VersionedTransaction {
    let ix = system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 1);
    let message = v0::Message::try_compile(&payer.pubkey(), &[ix], &[], Hash::new_unique()).unwrap();
    VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::V0(message),
    }
}

fn submitter(ledger: &Arc<MockLedger>, relay: &Arc<MockRelay>, settings: SubmitterSettings) -> BundleSubmitter {
    BundleSubmitter::new(ledger.clone(), relay.clone(), settings)
}

/// Transactions the relay received on its first call, decoded
fn relayed_bundle(relay: &MockRelay) -> Vec<VersionedTransaction> {
    let calls = relay.get_calls();
    calls[0]
        .1
        .iter()
        .map(|encoded| decode_transaction(encoded, TransactionEncoding::Base58).unwrap())
        .collect()
}

// ============================================================================
// Sell Path
// ============================================================================

#[tokio::test]
async fn test_fee_transaction_first_and_caller_order_kept() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-1"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let txs = vec![signed_tx(&payer, 1), signed_tx(&payer, 2), signed_tx(&payer, 3)];
    let expected: Vec<Signature> = txs.iter().map(|tx| tx.signatures[0]).collect();

    let result = submitter.submit_sell_bundle(txs, &payer).await.unwrap();

    let relayed = relayed_bundle(&relay);
    assert_eq!(relayed.len(), 4);
    assert_eq!(
        result.fee_tx_signature,
        Some(relayed[0].signatures[0].to_string())
    );
    let relayed_caller: Vec<Signature> = relayed[1..].iter().map(|tx| tx.signatures[0]).collect();
    assert_eq!(relayed_caller, expected);

    // Fee transaction pays a known tip account
    let pool = TipPool::jito_mainnet();
    assert!(relayed[0]
        .message
        .static_account_keys()
        .iter()
        .any(|key| pool.contains(key)));
}

#[tokio::test]
async fn test_accepted_and_landed() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new().with_pending_polls(2));
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-ok"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(result.confirmed);
    assert_eq!(result.bundle_id.as_deref(), Some("bundle-ok"));
    assert!(result.fee_tx_signature.is_some());
    assert_eq!(ledger.blockhash_calls(), vec![CommitmentConfig::confirmed()]);
}

#[tokio::test]
async fn test_all_relays_fail_returns_rejected() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(
        MockRelay::new()
            .with_failure(NY, RelayError::RateLimited)
            .with_failure(AMS, RelayError::HttpStatus { status: 500, body: "oops".into() }),
    );
    let submitter = submitter(&ledger, &relay, settings(&[NY, AMS]));

    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert_eq!(result, SubmissionResult::rejected());
    assert_eq!(relay.call_count(), 2);
    // Nothing to confirm when no relay took the bundle
    assert!(ledger.status_calls().is_empty());
}

#[tokio::test]
async fn test_one_relay_failing_does_not_reject() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(
        MockRelay::new()
            .with_failure(NY, RelayError::Timeout)
            .with_success(AMS, "bundle-ams"),
    );
    let submitter = submitter(&ledger, &relay, settings(&[NY, AMS]));

    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(result.confirmed);
    assert_eq!(result.bundle_id.as_deref(), Some("bundle-ams"));
}

#[tokio::test]
async fn test_accepted_but_failed_on_chain() {
    let payer = Keypair::new();
    let ledger = Arc::new(
        MockLedger::new().with_signature_status(SignatureStatus::Failed("InsufficientFundsForFee".into())),
    );
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-x"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(!result.confirmed);
    assert!(result.fee_tx_signature.is_some());
    assert_eq!(result.bundle_id.as_deref(), Some("bundle-x"));
}

#[tokio::test]
async fn test_accepted_but_never_lands() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new().with_signature_status(SignatureStatus::Pending));
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-slow"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(!result.confirmed);
    assert_eq!(result.bundle_id.as_deref(), Some("bundle-slow"));
}

#[tokio::test]
async fn test_all_signatures_mode_checks_every_transaction() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-all"));
    let mut settings = settings(&[NY]);
    settings.confirmation.mode = ConfirmationMode::AllSignatures;
    let submitter = submitter(&ledger, &relay, settings);

    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1), signed_tx(&payer, 2)], &payer)
        .await
        .unwrap();

    assert!(result.confirmed);
    assert_eq!(ledger.status_calls().len(), 3);
}

// ============================================================================
// Setup Path
// ============================================================================

#[tokio::test]
async fn test_setup_path_uses_finalized_blockhash_and_sig_verify() {
    let payer = Keypair::new();
    let authority = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-setup"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let setup = vec![system_instruction::transfer(&authority.pubkey(), &Pubkey::new_unique(), 10)];
    let result = submitter
        .submit_bundle_with_setup(setup, &[&authority], vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(result.confirmed);
    assert_eq!(ledger.blockhash_calls(), vec![CommitmentConfig::finalized()]);

    let simulated = ledger.simulated();
    assert_eq!(simulated.len(), 2);
    assert!(simulated.iter().all(|(_, sig_verify)| *sig_verify));

    // Fee transaction carries both payer and authority signatures
    let relayed = relayed_bundle(&relay);
    let signers = &relayed[0].message.static_account_keys()[..2];
    assert!(signers.contains(&payer.pubkey()));
    assert!(signers.contains(&authority.pubkey()));
}

#[tokio::test]
async fn test_setup_missing_signer_never_hits_network() {
    let payer = Keypair::new();
    let authority = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let setup = vec![system_instruction::transfer(&authority.pubkey(), &Pubkey::new_unique(), 10)];
    let err = submitter
        .submit_bundle_with_setup(setup, &[], vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap_err();

    assert_eq!(err, BundleError::MissingSigner(authority.pubkey()));
    assert!(ledger.blockhash_calls().is_empty());
    assert_eq!(relay.call_count(), 0);
}

// ============================================================================
// Failures before broadcast
// ============================================================================

#[tokio::test]
async fn test_blockhash_failure_returns_unconfirmed() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new().with_blockhash_error(LedgerError::RpcError("node down".into())));
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert_eq!(result, SubmissionResult::rejected());
    assert!(!result.confirmed);
    assert_eq!(relay.call_count(), 0);
    assert!(ledger.simulated().is_empty());
}

#[tokio::test]
async fn test_setup_path_blockhash_failure_returns_unconfirmed() {
    let payer = Keypair::new();
    let authority = Keypair::new();
    let ledger = Arc::new(MockLedger::new().with_blockhash_error(LedgerError::RpcError("node down".into())));
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let setup = vec![system_instruction::transfer(&authority.pubkey(), &Pubkey::new_unique(), 10)];
    let result = submitter
        .submit_bundle_with_setup(setup, &[&authority], vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(!result.confirmed);
    assert_eq!(ledger.blockhash_calls(), vec![CommitmentConfig::finalized()]);
    assert_eq!(relay.call_count(), 0);
}

#[tokio::test]
async fn test_unsigned_caller_transaction_is_an_error() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let err = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1), unsigned_tx(&payer)], &payer)
        .await
        .unwrap_err();

    assert_eq!(err, BundleError::Unsigned { index: 2 });
    assert_eq!(relay.call_count(), 0);
}

#[tokio::test]
async fn test_oversized_bundle_is_an_error() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let txs = (1..=5).map(|i| signed_tx(&payer, i)).collect();
    let err = submitter.submit_sell_bundle(txs, &payer).await.unwrap_err();

    assert_eq!(err, BundleError::BundleTooLarge { len: 6, max: 5 });
    assert!(ledger.blockhash_calls().is_empty());
}

// ============================================================================
// Simulation, fan-out, treasury
// ============================================================================

#[tokio::test]
async fn test_failed_simulation_does_not_abort() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new().with_simulation(Ok(SimulationReport {
        err: Some("InstructionError(0, Custom(1))".into()),
        logs: vec!["Program log: slippage".into()],
        units_consumed: Some(1_400),
    })));
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-sim"));
    let submitter = submitter(&ledger, &relay, settings(&[NY]));

    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(result.confirmed);
    let simulated = ledger.simulated();
    assert_eq!(simulated.len(), 2);
    assert!(simulated.iter().all(|(_, sig_verify)| !*sig_verify));
}

#[tokio::test]
async fn test_simulation_disabled() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle"));
    let mut settings = settings(&[NY]);
    settings.simulate = false;
    let submitter = submitter(&ledger, &relay, settings);

    submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(ledger.simulated().is_empty());
}

#[tokio::test]
async fn test_relays_are_contacted_concurrently() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let delay = Duration::from_millis(200);
    let relay = Arc::new(
        MockRelay::new()
            .with_success(NY, "a")
            .with_success(AMS, "b")
            .with_success(TYO, "c")
            .with_delay(NY, delay)
            .with_delay(AMS, delay)
            .with_delay(TYO, delay),
    );
    let mut settings = settings(&[NY, AMS, TYO]);
    settings.simulate = false;
    let submitter = submitter(&ledger, &relay, settings);

    let start = Instant::now();
    let result = submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    assert!(start.elapsed() < Duration::from_millis(450));
    assert!(result.confirmed);
    assert_eq!(relay.call_count(), 3);
}

#[tokio::test]
async fn test_treasury_transfer_in_fee_transaction() {
    let payer = Keypair::new();
    let treasury = Pubkey::new_unique();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-t"));
    let mut settings = settings(&[NY]);
    settings.treasury = Some(TreasuryFee { account: treasury, lamports: 5_000 });
    let submitter = submitter(&ledger, &relay, settings);

    submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    let relayed = relayed_bundle(&relay);
    assert!(relayed[0].message.static_account_keys().contains(&treasury));
    assert_eq!(relayed[0].message.instructions().len(), 2);
}

#[tokio::test]
async fn test_base64_encoding_reaches_relay() {
    let payer = Keypair::new();
    let ledger = Arc::new(MockLedger::new());
    let relay = Arc::new(MockRelay::new().with_success(NY, "bundle-64"));
    let mut settings = settings(&[NY]);
    settings.encoding = TransactionEncoding::Base64;
    let submitter = submitter(&ledger, &relay, settings);

    submitter
        .submit_sell_bundle(vec![signed_tx(&payer, 1)], &payer)
        .await
        .unwrap();

    let calls = relay.get_calls();
    for encoded in &calls[0].1 {
        assert!(decode_transaction(encoded, TransactionEncoding::Base64).is_ok());
    }
}
