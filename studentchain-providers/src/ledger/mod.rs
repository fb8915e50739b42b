//! Ledger anchoring for approved records.
//!
//! Approved record hashes are anchored on a public ledger through a smart
//! contract exposing `verifyRecord`/`addRecord`/`revokeRecord`. The contract
//! itself is an opaque collaborator: this module defines the read/write
//! client interface plus a JSON-RPC implementation of it.
//!
//! Writes are asynchronous and potentially slow or failing; the caller must
//! treat [`add_record`]/[`revoke_record`] followed by [`await_confirmation`]
//! as a blocking prerequisite step and commit no local state until the
//! confirmation succeeds.
//!
//! [`add_record`]: LedgerClient::add_record
//! [`revoke_record`]: LedgerClient::revoke_record
//! [`await_confirmation`]: LedgerClient::await_confirmation

use crate::common_models::account::WalletAddress;
use crate::ledger::error::LedgerError;
use crate::ledger::model::{LedgerRecord, TransactionHandle};
use crate::util::canonical::CanonicalHash;

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait LedgerClient: Send + Sync {
    /// Read-only validity lookup. Callers pass the canonical form; the bare
    /// lowercase form is allowed only as the backward-compatible secondary
    /// key for values anchored before canonicalization was enforced.
    async fn verify_record(&self, hash: &str) -> Result<LedgerRecord, LedgerError>;

    /// Registers a hash for the given owner. The returned transaction must
    /// be confirmed before the approval is committed locally.
    async fn add_record(
        &self,
        hash: &CanonicalHash,
        owner: &WalletAddress,
    ) -> Result<TransactionHandle, LedgerError>;

    /// Removes ledger validity for a hash.
    async fn revoke_record(&self, hash: &CanonicalHash) -> Result<TransactionHandle, LedgerError>;

    /// Blocks until the transaction is confirmed or the ledger reports
    /// failure, bounded by the configured call timeout.
    async fn await_confirmation(&self, transaction: TransactionHandle) -> Result<(), LedgerError>;
}
