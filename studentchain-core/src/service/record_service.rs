//! The record lifecycle state machine.
//!
//! Legal transitions, and who may trigger them:
//!
//! | From     | Action  | Actor  | To        |
//! |----------|---------|--------|-----------|
//! | —        | submit  | owner  | Pending   |
//! | Pending  | approve | school | Verified  |
//! | Pending  | reject  | school | Rejected  |
//! | Pending  | cancel  | owner  | (deleted) |
//! | Verified | revoke  | school | Revoked   |
//!
//! Rejected and Revoked are terminal. Every other combination of status and
//! action fails with [`RecordServiceError::InvalidState`]; in particular,
//! re-approving an already Verified record is an error rather than a
//! timestamp-refreshing no-op.
//!
//! Approve and revoke anchor their ledger write and wait for confirmation
//! *before* mutating local state: a failed or unconfirmed ledger call leaves
//! the record untouched and surfaces the specific ledger failure to the
//! caller. There is no automatic retry.

use std::sync::Arc;

use studentchain_providers::common_models::account::{Account, AccountId, AccountRole};
use studentchain_providers::common_models::record::{Record, RecordId, RecordStatus};
use studentchain_providers::ledger::LedgerClient;
use studentchain_providers::storage::{AccountStorage, OwnedRecord};
use studentchain_providers::util::canonical::canonicalize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::service::error::RecordServiceError;

pub struct RecordService {
    storage: Arc<dyn AccountStorage>,
    ledger: Arc<dyn LedgerClient>,
}

impl RecordService {
    pub fn new(storage: Arc<dyn AccountStorage>, ledger: Arc<dyn LedgerClient>) -> Self {
        Self { storage, ledger }
    }

    /// Creates a Pending record owned by `owner_id`. The hash is stored in
    /// canonical form and is immutable afterwards. Duplicate hashes are
    /// allowed.
    pub async fn submit(
        &self,
        owner_id: &AccountId,
        file_name: &str,
        content_hash: &str,
        file_data: Vec<u8>,
    ) -> Result<RecordId, RecordServiceError> {
        let content_hash = canonicalize(content_hash);
        if content_hash.is_empty() {
            return Err(RecordServiceError::Validation(
                "missing content hash".to_string(),
            ));
        }
        if self.storage.get(owner_id).await?.is_none() {
            return Err(RecordServiceError::Validation(format!(
                "unknown owner account `{owner_id}`"
            )));
        }

        let record = Record {
            id: RecordId::from(Uuid::new_v4()),
            file_name: file_name.to_string(),
            content_hash,
            file_data,
            status: RecordStatus::Pending,
            verified_by: None,
            created_date: OffsetDateTime::now_utc(),
            verified_date: None,
        };
        let id = record.id;
        self.storage.push_record(owner_id, record).await?;
        tracing::info!("record {id} submitted by account {owner_id}");

        Ok(id)
    }

    /// Approves a Pending record. The hash is anchored on the ledger and
    /// the transaction confirmed first; on ledger failure the record stays
    /// Pending.
    pub async fn approve(
        &self,
        record_id: &RecordId,
        verifier_id: &AccountId,
    ) -> Result<Record, RecordServiceError> {
        let verifier = self.require_school(verifier_id, "approve").await?;
        let owned = self.require_record(record_id).await?;
        let mut record = owned.record;
        if record.status != RecordStatus::Pending {
            return Err(RecordServiceError::InvalidState {
                action: "approve",
                status: record.status,
            });
        }

        let transaction = self
            .ledger
            .add_record(&record.content_hash, &owned.owner_wallet)
            .await?;
        self.ledger.await_confirmation(transaction).await?;

        record.status = RecordStatus::Verified;
        record.verified_by = Some(verifier.wallet_address.clone());
        record.verified_date = Some(OffsetDateTime::now_utc());
        self.storage.update_record(&owned.owner_id, record.clone()).await?;
        tracing::info!(
            "record {record_id} approved by school {}",
            verifier.wallet_address
        );

        Ok(record)
    }

    /// Rejects a Pending record. No ledger interaction; Rejected is
    /// terminal.
    pub async fn reject(
        &self,
        record_id: &RecordId,
        verifier_id: &AccountId,
    ) -> Result<Record, RecordServiceError> {
        let verifier = self.require_school(verifier_id, "reject").await?;
        let owned = self.require_record(record_id).await?;
        let mut record = owned.record;
        if record.status != RecordStatus::Pending {
            return Err(RecordServiceError::InvalidState {
                action: "reject",
                status: record.status,
            });
        }

        record.status = RecordStatus::Rejected;
        record.verified_by = Some(verifier.wallet_address.clone());
        record.verified_date = Some(OffsetDateTime::now_utc());
        self.storage.update_record(&owned.owner_id, record.clone()).await?;
        tracing::info!(
            "record {record_id} rejected by school {}",
            verifier.wallet_address
        );

        Ok(record)
    }

    /// Removes a still-Pending record permanently. Only the owning account
    /// may cancel.
    pub async fn cancel(
        &self,
        record_id: &RecordId,
        caller_id: &AccountId,
    ) -> Result<(), RecordServiceError> {
        let owned = self.require_record(record_id).await?;
        if owned.owner_id != *caller_id {
            return Err(RecordServiceError::Authorization(
                "only the owning account may cancel a record".to_string(),
            ));
        }
        if owned.record.status != RecordStatus::Pending {
            return Err(RecordServiceError::InvalidState {
                action: "cancel",
                status: owned.record.status,
            });
        }

        if !self.storage.remove_record(&owned.owner_id, record_id).await? {
            return Err(RecordServiceError::RecordNotFound(*record_id));
        }
        tracing::info!("record {record_id} cancelled by its owner");

        Ok(())
    }

    /// Revokes a Verified record. The ledger revocation is confirmed before
    /// the local status changes; Revoked is terminal.
    pub async fn revoke(
        &self,
        record_id: &RecordId,
        verifier_id: &AccountId,
    ) -> Result<Record, RecordServiceError> {
        let verifier = self.require_school(verifier_id, "revoke").await?;
        let owned = self.require_record(record_id).await?;
        let mut record = owned.record;
        if record.status != RecordStatus::Verified {
            return Err(RecordServiceError::InvalidState {
                action: "revoke",
                status: record.status,
            });
        }

        let transaction = self.ledger.revoke_record(&record.content_hash).await?;
        self.ledger.await_confirmation(transaction).await?;

        record.status = RecordStatus::Revoked;
        self.storage.update_record(&owned.owner_id, record.clone()).await?;
        tracing::info!(
            "record {record_id} revoked by school {}",
            verifier.wallet_address
        );

        Ok(record)
    }

    /// Records in exactly the given status, across all accounts.
    pub async fn list_by_status(
        &self,
        status: RecordStatus,
    ) -> Result<Vec<OwnedRecord>, RecordServiceError> {
        Ok(self.storage.list_records_by_status(&[status]).await?)
    }

    /// Records awaiting a school decision.
    pub async fn pending_queue(&self) -> Result<Vec<OwnedRecord>, RecordServiceError> {
        self.list_by_status(RecordStatus::Pending).await
    }

    /// Approved records. Revoked records are included so revocation history
    /// stays visible.
    pub async fn approved_queue(&self) -> Result<Vec<OwnedRecord>, RecordServiceError> {
        Ok(self
            .storage
            .list_records_by_status(&[RecordStatus::Verified, RecordStatus::Revoked])
            .await?)
    }

    async fn require_school(
        &self,
        verifier_id: &AccountId,
        action: &'static str,
    ) -> Result<Account, RecordServiceError> {
        let verifier = self.storage.get(verifier_id).await?.ok_or_else(|| {
            RecordServiceError::Validation(format!("unknown verifier account `{verifier_id}`"))
        })?;
        if verifier.role != AccountRole::School {
            return Err(RecordServiceError::Authorization(format!(
                "only school accounts may {action} records"
            )));
        }

        Ok(verifier)
    }

    async fn require_record(
        &self,
        record_id: &RecordId,
    ) -> Result<OwnedRecord, RecordServiceError> {
        self.storage
            .find_record(record_id)
            .await?
            .ok_or(RecordServiceError::RecordNotFound(*record_id))
    }
}
