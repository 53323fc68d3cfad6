//! Fixed-TTL cache with copy-on-read semantics.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// One cached value with its insertion time.
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// A key → value-snapshot map with a fixed TTL measured from insertion.
///
/// Reads return a clone of the stored value, so callers can never mutate
/// shared cache state. Reads do not refresh the TTL; an entry inserted at
/// time T expires at T + ttl regardless of access. Expired entries are
/// dropped when read. Atomicity is per key only: no multi-key consistency
/// is provided or required.
pub struct TtlCache<K, V> {
    entries: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create a cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Get an isolated copy of a live entry's value.
    pub fn get(&self, key: &K) -> Option<V> {
        let hit = self.entries.get(key).and_then(|entry| {
            if entry.inserted_at.elapsed() < self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        });
        if hit.is_none() {
            // Drop the expired entry, if that is what we found.
            self.entries
                .remove_if(key, |_, entry| entry.inserted_at.elapsed() >= self.ttl);
        }
        hit
    }

    /// Insert a value snapshot, resetting the entry's TTL clock.
    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every entry unconditionally.
    pub fn purge_all(&self) {
        self.entries.clear();
    }

    /// Number of entries, including any not yet swept expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
