use studentchain_providers::common_models::record::{RecordId, RecordStatus};
use studentchain_providers::ledger::error::LedgerError;
use studentchain_providers::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountServiceError {
    #[error("Validation error: `{0}`")]
    Validation(String),
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum RecordServiceError {
    /// A required field is missing or does not resolve.
    #[error("Validation error: `{0}`")]
    Validation(String),
    #[error("Record not found: `{0}`")]
    RecordNotFound(RecordId),
    /// The actor lacks permission for the attempted transition.
    #[error("Not authorized: `{0}`")]
    Authorization(String),
    /// The transition is illegal from the record's current status.
    #[error("Cannot {action} a record in status `{status}`")]
    InvalidState {
        action: &'static str,
        status: RecordStatus,
    },
    /// A ledger write failed before the local mutation; nothing was
    /// committed. The inner kind distinguishes transient failures worth
    /// re-initiating from declined transactions.
    #[error("Ledger error: `{0}`")]
    Ledger(#[from] LedgerError),
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}
