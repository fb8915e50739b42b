//! Content digests for submitted record files.
//!
//! Hashing is delimited in its own crate so the digest primitive anchored on
//! the ledger can be audited or replaced independently of the rest of the
//! library. The digest is always computed over the exact raw bytes of the
//! uploaded file, never over a textual or base64 encoding of it, so that the
//! stored hash matches one computed independently by any outside verifier.

use thiserror::Error;

pub mod imp;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum HasherError {
    #[error("Could not hash")]
    CouldNotHash,
}

/// Provides hashing of raw file bytes.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Hasher: Send + Sync {
    /// Digest as lowercase hex, the textual form stored with the record and
    /// anchored on the ledger.
    fn hash_hex(&self, input: &[u8]) -> Result<String, HasherError>;

    /// Raw digest bytes.
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError>;
}
