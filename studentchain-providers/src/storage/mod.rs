//! Persistence for accounts and their embedded records.
//!
//! Records live inside their owning account, ordered by submission.
//! Record-level lookups scan the account collection; the data volume is
//! small enough that no secondary index is kept.
//!
//! No cross-call atomicity is provided beyond a single operation: two
//! conflicting transitions on the same record are a last-write-wins race.

use thiserror::Error;

use crate::common_models::account::{Account, AccountId, WalletAddress};
use crate::common_models::record::{Record, RecordId, RecordStatus};

pub mod in_memory;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait AccountStorage: Send + Sync {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, StorageError>;

    /// Case-insensitive wallet lookup.
    async fn get_by_wallet(&self, address: &str) -> Result<Option<Account>, StorageError>;

    async fn insert(&self, account: Account) -> Result<(), StorageError>;

    /// Appends a record to the owning account.
    async fn push_record(&self, owner: &AccountId, record: Record) -> Result<(), StorageError>;

    /// Locates a record and its owning account by record id.
    async fn find_record(&self, id: &RecordId) -> Result<Option<OwnedRecord>, StorageError>;

    /// Replaces the stored record carrying the same id.
    async fn update_record(&self, owner: &AccountId, record: Record) -> Result<(), StorageError>;

    /// Removes a record permanently. Returns false if it was not present.
    async fn remove_record(&self, owner: &AccountId, id: &RecordId)
        -> Result<bool, StorageError>;

    /// All records whose status is one of `statuses`, paired with the
    /// owning account.
    async fn list_records_by_status(
        &self,
        statuses: &[RecordStatus],
    ) -> Result<Vec<OwnedRecord>, StorageError>;
}

/// A record paired with its owning account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedRecord {
    pub owner_id: AccountId,
    pub owner_wallet: WalletAddress,
    pub record: Record,
}

#[derive(Clone, Debug, Error)]
pub enum StorageError {
    #[error("Get error: `{0}`")]
    Get(String),
    #[error("Insert error: `{0}`")]
    Insert(String),
    #[error("Update error: `{0}`")]
    Update(String),
    #[error("Delete error: `{0}`")]
    Delete(String),
    #[error("Account not found: `{0}`")]
    AccountNotFound(AccountId),
}
