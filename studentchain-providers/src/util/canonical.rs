//! Canonical form of content hashes.
//!
//! The same logical digest reaches the system in several textual encodings:
//! with or without a `0x` prefix, in mixed case, or with surrounding
//! whitespace. Every ledger call and every local comparison goes through one
//! canonical form, so a record can never show as unverified purely because
//! of an encoding mismatch.

use serde::{Deserialize, Serialize};

/// A content hash in canonical form: a single `0x` prefix followed by
/// lowercase hex. Construct via [`canonicalize`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CanonicalHash(String);

impl CanonicalHash {
    /// The `0x`-prefixed lowercase form used for all ledger calls.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unprefixed lowercase form. Kept only as a secondary lookup key for
    /// matching values recorded before canonicalization was enforced.
    pub fn bare(&self) -> &str {
        &self.0[2..]
    }

    /// True when the input held no hash at all (only whitespace and/or a
    /// bare prefix).
    pub fn is_empty(&self) -> bool {
        self.0.len() == 2
    }
}

impl std::fmt::Display for CanonicalHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Normalizes a raw hash string: trim whitespace, strip one leading
/// case-insensitive `0x`, lowercase, re-prepend `0x`. Idempotent.
pub fn canonicalize(raw: &str) -> CanonicalHash {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    CanonicalHash(format!("0x{}", stripped.to_lowercase()))
}
