//! Cache: thread-safe LRU over the intrusive core

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Fixed-capacity, thread-safe LRU cache.
///
/// Any number of threads may call `get` and `put` concurrently on a shared
/// instance. Each call holds one mutex for its full duration, so the index
/// and the recency list are never observable in a half-updated state.
///
/// A single `Mutex` is used rather than an `RwLock`: every `get` relinks the
/// accessed entry to the most-recently-used position, so even lookups need
/// exclusive access and shared read locking would gain nothing.
pub struct Cache<K, V> {
    /// Index + recency list, mutated as one unit
    inner: Mutex<LruCache<K, V>>,

    /// Cache statistics
    stats: Arc<CacheStats>,

    /// Cache capacity
    capacity: usize,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be positive
    ///
    /// # Returns
    /// * `Result<Cache>` - `Error::InvalidCapacity` when `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)),
            stats: Arc::new(CacheStats::new()),
            capacity,
        })
    }

    /// Get a value from the cache
    ///
    /// A hit marks the entry most recently used. A miss returns `None`; it
    /// is an absence, not an error.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        match inner.get(key) {
            Some(value) => {
                let value = value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Put a value into the cache
    ///
    /// Overwrites the value in place when `key` is already present, without
    /// evicting. A fresh insert at capacity evicts the least-recently-used
    /// entry first. Always succeeds.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        let evicted = inner.put(key, value);
        self.stats.record_insert();
        if evicted.is_some() {
            self.stats.record_eviction();
        }
    }

    /// Check whether a key is present without refreshing its recency
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Get the current number of cached entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get the cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of keys ordered least- to most-recently-used
    ///
    /// The first key is the next eviction victim. Intended for tests and
    /// diagnostics; it walks the whole list under the lock.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
