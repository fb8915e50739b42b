use thiserror::Error;

use crate::http_client::HttpClientError;

/// Failure kinds are kept distinguishable so a caller can decide whether an
/// operation is worth re-initiating (transient) or not (declined).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Network or RPC failure; the whole operation may be retried.
    #[error("Ledger unavailable: `{0}`")]
    Unavailable(String),
    /// No answer within the configured call timeout.
    #[error("Ledger call timed out")]
    Timeout,
    /// The wallet or the contract declined the transaction.
    #[error("Ledger rejected the transaction: `{0}`")]
    Rejected(String),
    #[error("Invalid ledger response: `{0}`")]
    InvalidResponse(String),
}

impl From<HttpClientError> for LedgerError {
    fn from(error: HttpClientError) -> Self {
        LedgerError::Unavailable(error.to_string())
    }
}
