//! Intrusive LRU core: recency list + hash index.
//!
//! Single-threaded. `Cache` wraps this in a mutex for concurrent use.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

/// One cached entry, positioned in the recency list by slot-index links.
///
/// Links are indices into the slot arena rather than references, so the
/// bidirectional list carries no ownership cycles.
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Fixed-capacity LRU cache.
///
/// The recency list runs from `head` (least recently used, the eviction
/// victim) to `tail` (most recently used). The index and the list always
/// contain exactly the same set of entries.
pub(crate) struct LruCache<K, V> {
    index: HashMap<K, usize, RandomState>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a cache holding at most `capacity` entries.
    ///
    /// Callers validate capacity; `Cache::new` rejects zero before this runs.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "capacity validated by Cache::new");

        Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
        }
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_tail(idx);
        self.slots[idx].as_ref().map(|node| &node.value)
    }

    /// Insert or overwrite `key`, evicting the head first if at capacity.
    ///
    /// Returns the evicted key, if the insert displaced one. Overwrites never
    /// evict; they refresh recency in place.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<K> {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(node) = &mut self.slots[idx] {
                node.value = value;
            }
            self.move_to_tail(idx);
            return None;
        }

        // Evict before inserting so len never exceeds capacity, even
        // transiently.
        let evicted = if self.index.len() >= self.capacity {
            self.evict_head()
        } else {
            None
        };

        let idx = self.alloc_slot();
        self.slots[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: self.tail,
            next: None,
        });
        self.push_tail(idx);
        self.index.insert(key, idx);

        evicted
    }

    /// Number of live entries.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Membership test; does not refresh recency.
    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in eviction order: least recently used first.
    pub(crate) fn keys(&self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.index.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            match &self.slots[idx] {
                Some(node) => {
                    out.push(node.key.clone());
                    cursor = node.next;
                }
                None => break,
            }
        }
        out
    }

    /// Relink `idx` as the tail. No-op when it already is.
    fn move_to_tail(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.slots[idx] {
            node.prev = self.tail;
            node.next = None;
        }
        self.push_tail(idx);
    }

    /// Attach a node whose `prev` already points at the old tail.
    fn push_tail(&mut self, idx: usize) {
        if let Some(tail_idx) = self.tail {
            if let Some(tail) = &mut self.slots[tail_idx] {
                tail.next = Some(idx);
            }
        }
        self.tail = Some(idx);
        if self.head.is_none() {
            self.head = Some(idx);
        }
    }

    /// Splice `idx` out of the list, fixing head/tail when it was an end.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.slots[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.slots[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    /// Drop the current head and return its key.
    ///
    /// Only called from `put` when `len >= capacity`, so the list is never
    /// empty here; the `None` arm just skips eviction.
    fn evict_head(&mut self) -> Option<K> {
        let head_idx = self.head?;
        self.unlink(head_idx);
        let node = self.slots[head_idx].take()?;
        self.index.remove(&node.key);
        self.free.push(head_idx);
        Some(node.key)
    }

    fn alloc_slot(&mut self) -> usize {
        match self.free.pop() {
            Some(idx) => idx,
            None => {
                let idx = self.slots.len();
                self.slots.push(None);
                idx
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        let evicted = cache.put(3, "c");

        assert_eq!(evicted, Some(1));
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.get(&3), Some(&"c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1);
        let evicted = cache.put(3, "c");

        assert_eq!(evicted, Some(2));
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), None);
    }

    #[test]
    fn test_overwrite_keeps_size_and_refreshes() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.put(1, "a2"), None);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(&"a2"));

        // 1 was refreshed by the overwrite, so 2 is the victim.
        assert_eq!(cache.put(3, "c"), Some(2));
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut cache = LruCache::new(3);

        for i in 0..20 {
            cache.put(i, i * 10);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_keys_ordered_lru_to_mru() {
        let mut cache = LruCache::new(3);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        assert_eq!(cache.keys(), vec![1, 2, 3]);

        cache.get(&1);
        assert_eq!(cache.keys(), vec![2, 3, 1]);

        cache.put(4, "d");
        assert_eq!(cache.keys(), vec![3, 1, 4]);
    }

    #[test]
    fn test_single_slot_cache() {
        let mut cache = LruCache::new(1);

        cache.put(1, "a");
        assert_eq!(cache.put(2, "b"), Some(1));
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_contains_key_does_not_reorder() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert!(cache.contains_key(&1));

        // 1 is still the head since contains_key is not an access.
        assert_eq!(cache.put(3, "c"), Some(1));
    }

    #[test]
    fn test_slot_reuse_after_eviction() {
        let mut cache = LruCache::new(2);

        for i in 0..100 {
            cache.put(i, i);
        }

        // Arena never grows past capacity: every eviction frees a slot
        // that the following insert reuses.
        assert_eq!(cache.slots.len(), 2);
        assert_eq!(cache.keys(), vec![98, 99]);
    }

    #[test]
    fn test_repeated_hits_idempotent() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        for _ in 0..5 {
            assert_eq!(cache.get(&1), Some(&"a"));
            assert_eq!(cache.len(), 1);
        }
    }
}
