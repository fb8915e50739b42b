use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::macros::{impl_display, impl_from, impl_into};
use super::record::Record;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);
impl_display!(AccountId);
impl_from!(AccountId; Uuid);
impl_into!(AccountId; Uuid);

/// Wallet address used for login and ledger anchoring.
///
/// Addresses arrive from wallets in mixed case; the stored form is trimmed
/// and lowercased on registration, and comparisons go through [`matches`]
/// so lookups stay case-insensitive.
///
/// [`matches`]: WalletAddress::matches
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WalletAddress(String);
impl_display!(WalletAddress);

impl WalletAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into().trim().to_lowercase())
    }

    /// Case-insensitive comparison against a raw address string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Student,
    School,
    Company,
}

/// An account, created on first login with a previously unseen wallet
/// address. Accounts are never deleted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub wallet_address: WalletAddress,
    pub role: AccountRole,
    pub created_date: OffsetDateTime,

    // Records are embedded in their owning account, ordered by submission.
    pub records: Vec<Record>,
}
