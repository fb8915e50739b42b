use std::collections::HashMap;

use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::util::canonical::CanonicalHash;

use super::LedgerPresence;

/// Cached reconciliation results, keyed by canonical hash.
///
/// The cache is an explicit object handed to the reconciler, not
/// process-wide state. Entries older than `refresh_after` are treated as
/// absent so the next reconciliation pass re-checks them. When the cache
/// grows past `cache_size`, the least-used entry goes first, oldest on ties.
pub struct StatusCache {
    entries: Mutex<HashMap<CanonicalHash, CacheEntry>>,
    cache_size: usize,
    refresh_after: time::Duration,
}

#[derive(Clone, Debug)]
struct CacheEntry {
    presence: LedgerPresence,
    last_checked: OffsetDateTime,
    hit_counter: u32,
}

impl StatusCache {
    pub fn new(cache_size: usize, refresh_after: time::Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            cache_size,
            refresh_after,
        }
    }

    /// Returns the cached presence if the entry is still fresh.
    pub async fn get_fresh(&self, hash: &CanonicalHash) -> Option<LedgerPresence> {
        let mut entries = self.entries.lock().await;

        let entry = entries.get_mut(hash)?;
        if OffsetDateTime::now_utc() - entry.last_checked > self.refresh_after {
            return None;
        }
        entry.hit_counter += 1;

        Some(entry.presence)
    }

    pub async fn put(&self, hash: CanonicalHash, presence: LedgerPresence) {
        let mut entries = self.entries.lock().await;

        entries.insert(
            hash.clone(),
            CacheEntry {
                presence,
                last_checked: OffsetDateTime::now_utc(),
                hit_counter: 0,
            },
        );

        if entries.len() > self.cache_size {
            if let Some(key) = entries
                .iter()
                .filter(|(key, _)| **key != hash)
                .min_by(|(_, a), (_, b)| {
                    a.hit_counter
                        .cmp(&b.hit_counter)
                        .then(a.last_checked.cmp(&b.last_checked))
                })
                .map(|(key, _)| key.clone())
            {
                entries.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::canonical::canonicalize;

    #[tokio::test]
    async fn test_fresh_entry_is_returned() {
        let cache = StatusCache::new(10, time::Duration::seconds(60));
        let hash = canonicalize("abcd");

        cache.put(hash.clone(), LedgerPresence::OnLedger).await;

        assert_eq!(
            cache.get_fresh(&hash).await,
            Some(LedgerPresence::OnLedger)
        );
    }

    #[tokio::test]
    async fn test_stale_entry_is_treated_as_absent() {
        let cache = StatusCache::new(10, time::Duration::seconds(-1));
        let hash = canonicalize("abcd");

        cache.put(hash.clone(), LedgerPresence::OnLedger).await;

        assert_eq!(cache.get_fresh(&hash).await, None);
    }

    #[tokio::test]
    async fn test_overfilled_cache_evicts_least_used() {
        let cache = StatusCache::new(2, time::Duration::seconds(60));
        let first = canonicalize("01");
        let second = canonicalize("02");
        let third = canonicalize("03");

        cache.put(first.clone(), LedgerPresence::OnLedger).await;
        cache.put(second.clone(), LedgerPresence::Absent).await;
        // Touch the first entry so the second becomes the eviction candidate.
        cache.get_fresh(&first).await;

        cache.put(third.clone(), LedgerPresence::OnLedger).await;

        assert!(cache.get_fresh(&first).await.is_some());
        assert!(cache.get_fresh(&second).await.is_none());
        assert!(cache.get_fresh(&third).await.is_some());
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_are_last_write_wins() {
        let cache = StatusCache::new(10, time::Duration::seconds(60));
        let hash = canonicalize("abcd");

        cache.put(hash.clone(), LedgerPresence::OnLedger).await;
        cache.put(hash.clone(), LedgerPresence::Absent).await;

        assert_eq!(cache.get_fresh(&hash).await, Some(LedgerPresence::Absent));
    }
}
