use serde::{Deserialize, Serialize};

/// Result of a read-only `verifyRecord` call.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub is_valid: bool,
    /// Wallet address the hash was anchored for.
    pub owner_address: String,
    /// Unix timestamp of the anchoring transaction.
    pub timestamp: i64,
}

/// Handle of a submitted but not yet confirmed ledger transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle(pub String);
