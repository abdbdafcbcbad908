//! Bounded in-memory cache with oldest-first eviction.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Mutex;

struct Inner<K, V> {
    map: HashMap<K, V>,
    /// Insertion order, oldest first. Re-inserting a key moves it to the back.
    order: VecDeque<K>,
}

/// Capacity-bounded cache. When full, the oldest-inserted entry is evicted.
///
/// Entries have no expiry: a cached value lives until evicted or until the
/// process exits. All mutation happens under one `Mutex`, so eviction
/// bookkeeping stays self-consistent even when several tasks race to
/// populate the same key (the last writer wins).
pub struct BoundedCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Returns a clone of the cached value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<V> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.map.get(key).cloned()
    }

    /// Inserts or overwrites an entry, evicting the oldest entry when the
    /// cache is over capacity. Overwriting refreshes the key's age.
    pub fn insert(&self, key: K, value: V) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.map.insert(key.clone(), value).is_some() {
            inner.order.retain(|k| k != &key);
        }
        inner.order.push_back(key);
        while inner.map.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.map.remove(&oldest);
            } else {
                break;
            }
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.map.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_set_and_get() {
        let cache = BoundedCache::new(2);
        cache.insert("key1", 1);
        assert_eq!(cache.get(&"key1"), Some(1));
    }

    #[test]
    fn cache_miss() {
        let cache: BoundedCache<&str, i32> = BoundedCache::new(2);
        assert_eq!(cache.get(&"nonexistent"), None);
    }

    #[test]
    fn cache_evicts_oldest_at_capacity() {
        let cache = BoundedCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn cache_overwrite_refreshes_age() {
        let cache = BoundedCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);
        cache.insert("c", 3);
        // "b" was oldest after "a" was refreshed.
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn zero_capacity_still_holds_one() {
        let cache = BoundedCache::new(0);
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));
        cache.insert("b", 2);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(2));
    }
}
