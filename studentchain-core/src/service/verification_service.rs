//! Read-only bridge between local record status and ledger validity.

use std::collections::HashMap;
use std::sync::Arc;

use studentchain_providers::reconciliation::{
    LedgerPresence, LedgerReconciler, VerificationOutcome,
};
use studentchain_providers::storage::OwnedRecord;
use studentchain_providers::util::canonical::CanonicalHash;

pub struct VerificationService {
    reconciler: Arc<LedgerReconciler>,
}

impl VerificationService {
    pub fn new(reconciler: Arc<LedgerReconciler>) -> Self {
        Self { reconciler }
    }

    /// Advisory ledger check backing the "verified on ledger" display
    /// badges. The lifecycle status stays authoritative; divergence between
    /// the two sides is reported, never resolved here. Intended to run on
    /// every list refresh.
    pub async fn check_ledger_status(
        &self,
        records: &[OwnedRecord],
    ) -> HashMap<CanonicalHash, LedgerPresence> {
        self.reconciler.check_ledger_status(records).await
    }

    /// Public, unauthenticated hash verification, as triggered by scanning
    /// a record's QR code.
    pub async fn verify_hash(&self, raw_hash: &str) -> VerificationOutcome {
        self.reconciler.verify_hash(raw_hash).await
    }
}
