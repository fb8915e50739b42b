//! Advisory comparison of local record status against ledger validity.
//!
//! Reconciliation never mutates local state: the lifecycle status stays
//! authoritative, and a record may legitimately be `Verified` locally while
//! the ledger reports its hash absent (anchoring still pending, or the two
//! stores diverged). Both sides are reported as-is for display; the
//! divergence is never resolved automatically in favor of either one.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ledger::LedgerClient;
use crate::storage::OwnedRecord;
use crate::util::canonical::{canonicalize, CanonicalHash};

use self::status_cache::StatusCache;

pub mod status_cache;

#[cfg(test)]
mod test;

/// Ledger-side view of one hash.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerPresence {
    /// The hash is recorded and currently valid.
    OnLedger,
    /// The ledger answered and the hash is absent or revoked.
    Absent,
    /// The lookup failed; validity could not be determined.
    Unknown,
}

/// Outcome of the public verification endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    Valid {
        owner_address: String,
        timestamp: i64,
    },
    Invalid,
    Unreachable,
}

pub struct LedgerReconciler {
    ledger: Arc<dyn LedgerClient>,
    cache: StatusCache,
}

impl LedgerReconciler {
    pub fn new(ledger: Arc<dyn LedgerClient>, cache: StatusCache) -> Self {
        Self { ledger, cache }
    }

    /// Looks up ledger validity for every record with a non-empty hash.
    ///
    /// Failed lookups are reported as [`LedgerPresence::Unknown`]; one
    /// failing hash never aborts the rest of the batch. Safe to run
    /// concurrently and repeatedly: lookups are read-only and overlapping
    /// refreshes of the same hash are last-write-wins in the cache.
    pub async fn check_ledger_status(
        &self,
        records: &[OwnedRecord],
    ) -> HashMap<CanonicalHash, LedgerPresence> {
        let mut statuses = HashMap::new();
        for owned in records {
            let hash = &owned.record.content_hash;
            if hash.is_empty() || statuses.contains_key(hash) {
                continue;
            }
            let presence = self.lookup(hash).await;
            statuses.insert(hash.clone(), presence);
        }
        statuses
    }

    async fn lookup(&self, hash: &CanonicalHash) -> LedgerPresence {
        if let Some(cached) = self.cache.get_fresh(hash).await {
            return cached;
        }

        let presence = match self.ledger.verify_record(hash.as_str()).await {
            Ok(record) if record.is_valid => LedgerPresence::OnLedger,
            Ok(_) => LedgerPresence::Absent,
            Err(error) => {
                tracing::warn!("ledger lookup failed for {hash}: {error}");
                LedgerPresence::Unknown
            }
        };

        // Unknown results are not cached so the next refresh retries them.
        if presence != LedgerPresence::Unknown {
            self.cache.put(hash.clone(), presence).await;
        }

        presence
    }

    /// Public, unauthenticated verification path (QR code scans).
    ///
    /// The canonical form is looked up first; if the ledger answers but the
    /// hash is absent, one fallback lookup runs with the bare lowercase form
    /// to match hashes anchored before canonicalization was enforced.
    pub async fn verify_hash(&self, raw: &str) -> VerificationOutcome {
        let canonical = canonicalize(raw);
        if canonical.is_empty() {
            return VerificationOutcome::Invalid;
        }

        match self.ledger.verify_record(canonical.as_str()).await {
            Ok(record) if record.is_valid => {
                return VerificationOutcome::Valid {
                    owner_address: record.owner_address,
                    timestamp: record.timestamp,
                };
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!("public verification failed for {canonical}: {error}");
                return VerificationOutcome::Unreachable;
            }
        }

        match self.ledger.verify_record(canonical.bare()).await {
            Ok(record) if record.is_valid => VerificationOutcome::Valid {
                owner_address: record.owner_address,
                timestamp: record.timestamp,
            },
            Ok(_) => VerificationOutcome::Invalid,
            Err(_) => VerificationOutcome::Unreachable,
        }
    }
}
