use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::common_models::account::{AccountId, WalletAddress};
use crate::common_models::record::{Record, RecordId, RecordStatus};
use crate::ledger::error::LedgerError;
use crate::ledger::model::LedgerRecord;
use crate::ledger::MockLedgerClient;
use crate::reconciliation::status_cache::StatusCache;
use crate::reconciliation::{LedgerPresence, LedgerReconciler, VerificationOutcome};
use crate::storage::OwnedRecord;
use crate::util::canonical::canonicalize;

fn owned_record(hash: &str, status: RecordStatus) -> OwnedRecord {
    OwnedRecord {
        owner_id: AccountId::from(Uuid::new_v4()),
        owner_wallet: WalletAddress::new("0xstudent"),
        record: Record {
            id: RecordId::from(Uuid::new_v4()),
            file_name: "diploma.pdf".to_string(),
            content_hash: canonicalize(hash),
            file_data: vec![],
            status,
            verified_by: None,
            created_date: OffsetDateTime::now_utc(),
            verified_date: None,
        },
    }
}

fn valid_ledger_record() -> LedgerRecord {
    LedgerRecord {
        is_valid: true,
        owner_address: "0xstudent".to_string(),
        timestamp: 1716729600,
    }
}

fn invalid_ledger_record() -> LedgerRecord {
    LedgerRecord {
        is_valid: false,
        owner_address: String::new(),
        timestamp: 0,
    }
}

fn reconciler(ledger: MockLedgerClient) -> LedgerReconciler {
    LedgerReconciler::new(
        Arc::new(ledger),
        StatusCache::new(100, time::Duration::seconds(60)),
    )
}

#[tokio::test]
async fn test_one_failing_lookup_never_aborts_the_batch() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .withf(|hash| hash == "0xaa")
        .returning(|_| Ok(valid_ledger_record()));
    ledger
        .expect_verify_record()
        .withf(|hash| hash == "0xbb")
        .returning(|_| Err(LedgerError::Unavailable("connection refused".to_string())));
    ledger
        .expect_verify_record()
        .withf(|hash| hash == "0xcc")
        .returning(|_| Ok(invalid_ledger_record()));

    let records = vec![
        owned_record("AA", RecordStatus::Verified),
        owned_record("BB", RecordStatus::Verified),
        owned_record("CC", RecordStatus::Verified),
    ];

    let statuses = reconciler(ledger).check_ledger_status(&records).await;

    assert_eq!(statuses.len(), 3);
    assert_eq!(statuses[&canonicalize("aa")], LedgerPresence::OnLedger);
    assert_eq!(statuses[&canonicalize("bb")], LedgerPresence::Unknown);
    assert_eq!(statuses[&canonicalize("cc")], LedgerPresence::Absent);
}

#[tokio::test]
async fn test_locally_verified_but_absent_on_ledger_is_reported_as_is() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .returning(|_| Ok(invalid_ledger_record()));

    // Approved locally, but the anchoring never landed on the ledger. The
    // divergence must surface rather than being resolved either way.
    let records = vec![owned_record("dd", RecordStatus::Verified)];

    let statuses = reconciler(ledger).check_ledger_status(&records).await;

    assert_eq!(statuses[&canonicalize("dd")], LedgerPresence::Absent);
    assert_eq!(records[0].record.status, RecordStatus::Verified);
}

#[tokio::test]
async fn test_records_without_hash_are_skipped() {
    let ledger = MockLedgerClient::default();

    let records = vec![owned_record("", RecordStatus::Pending)];

    let statuses = reconciler(ledger).check_ledger_status(&records).await;

    assert!(statuses.is_empty());
}

#[tokio::test]
async fn test_duplicate_hashes_are_looked_up_once() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .times(1)
        .returning(|_| Ok(valid_ledger_record()));

    let records = vec![
        owned_record("0xAA", RecordStatus::Verified),
        owned_record("aa", RecordStatus::Verified),
    ];

    let statuses = reconciler(ledger).check_ledger_status(&records).await;

    assert_eq!(statuses.len(), 1);
}

#[tokio::test]
async fn test_fresh_cache_entry_skips_the_ledger() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .times(1)
        .returning(|_| Ok(valid_ledger_record()));

    let reconciler = reconciler(ledger);
    let records = vec![owned_record("aa", RecordStatus::Verified)];

    reconciler.check_ledger_status(&records).await;
    let statuses = reconciler.check_ledger_status(&records).await;

    assert_eq!(statuses[&canonicalize("aa")], LedgerPresence::OnLedger);
}

#[tokio::test]
async fn test_failed_lookups_are_not_cached() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .times(2)
        .returning(|_| Err(LedgerError::Timeout));

    let reconciler = reconciler(ledger);
    let records = vec![owned_record("aa", RecordStatus::Verified)];

    // Both passes hit the ledger: Unknown results must be retried.
    assert_eq!(
        reconciler.check_ledger_status(&records).await[&canonicalize("aa")],
        LedgerPresence::Unknown
    );
    assert_eq!(
        reconciler.check_ledger_status(&records).await[&canonicalize("aa")],
        LedgerPresence::Unknown
    );
}

#[tokio::test]
async fn test_verify_hash_valid() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .withf(|hash| hash == "0xabcd")
        .returning(|_| Ok(valid_ledger_record()));

    let outcome = reconciler(ledger).verify_hash(" 0XABCD ").await;

    assert_eq!(
        outcome,
        VerificationOutcome::Valid {
            owner_address: "0xstudent".to_string(),
            timestamp: 1716729600,
        }
    );
}

#[tokio::test]
async fn test_verify_hash_falls_back_to_bare_key() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .withf(|hash| hash == "0xabcd")
        .returning(|_| Ok(invalid_ledger_record()));
    // Anchored before canonicalization, under the unprefixed form.
    ledger
        .expect_verify_record()
        .withf(|hash| hash == "abcd")
        .returning(|_| Ok(valid_ledger_record()));

    let outcome = reconciler(ledger).verify_hash("ABCD").await;

    assert!(matches!(outcome, VerificationOutcome::Valid { .. }));
}

#[tokio::test]
async fn test_verify_hash_absent_on_both_keys_is_invalid() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .times(2)
        .returning(|_| Ok(invalid_ledger_record()));

    let outcome = reconciler(ledger).verify_hash("abcd").await;

    assert_eq!(outcome, VerificationOutcome::Invalid);
}

#[tokio::test]
async fn test_verify_hash_unreachable_ledger() {
    let mut ledger = MockLedgerClient::default();
    ledger
        .expect_verify_record()
        .returning(|_| Err(LedgerError::Unavailable("network down".to_string())));

    let outcome = reconciler(ledger).verify_hash("abcd").await;

    assert_eq!(outcome, VerificationOutcome::Unreachable);
}

#[tokio::test]
async fn test_verify_hash_empty_input_is_invalid() {
    let ledger = MockLedgerClient::default();

    let outcome = reconciler(ledger).verify_hash("  0x ").await;

    assert_eq!(outcome, VerificationOutcome::Invalid);
}
