use serde::{Deserialize, Serialize};
use strum::Display;
use time::OffsetDateTime;
use uuid::Uuid;

use super::account::WalletAddress;
use super::macros::{impl_display, impl_from, impl_into};
use crate::util::canonical::CanonicalHash;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);
impl_display!(RecordId);
impl_from!(RecordId; Uuid);
impl_into!(RecordId; Uuid);

/// One submitted document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub file_name: String,
    /// Canonical content hash. Immutable once the record is submitted.
    /// Duplicate hashes across records are allowed; uniqueness is not a
    /// data-model constraint.
    pub content_hash: CanonicalHash,
    pub file_data: Vec<u8>,
    pub status: RecordStatus,
    /// Wallet of the school account that decided on the record.
    pub verified_by: Option<WalletAddress>,
    pub created_date: OffsetDateTime,
    pub verified_date: Option<OffsetDateTime>,
}

/// The single canonical status vocabulary. Any display-language mapping
/// happens strictly at the presentation boundary, never here.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Pending,
    Verified,
    Rejected,
    Revoked,
}

impl RecordStatus {
    /// Terminal statuses admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordStatus::Rejected | RecordStatus::Revoked)
    }
}
