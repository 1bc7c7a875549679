use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Performance metrics for cache effectiveness
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of entries dropped to stay within capacity
    pub evictions: usize,
}

/// Map with least-recently-used eviction once a fixed capacity is reached
///
/// Storage and eviction are delegated to a `moka` cache. Eviction runs as
/// deferred maintenance, so the entry count may briefly exceed the capacity
/// until [`len`](Self::len) or [`stats`](Self::stats) flush it.
pub struct BoundedCache<K, V> {
    inner: Cache<K, V>,
    capacity: usize,
    hits: usize,
    misses: usize,
    evictions: Arc<AtomicUsize>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache holding at most `capacity` entries
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let evictions = Arc::new(AtomicUsize::new(0));
        let evicted = Arc::clone(&evictions);

        let inner = Cache::<K, V>::builder()
            .max_capacity(capacity as u64)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(move |_key, _value, cause| {
                if matches!(cause, RemovalCause::Size) {
                    evicted.fetch_add(1, Ordering::Relaxed);
                }
            })
            .build();

        Self {
            inner,
            capacity,
            hits: 0,
            misses: 0,
            evictions,
        }
    }

    /// Maximum number of entries
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored entries after pending evictions are applied
    pub fn len(&self) -> usize {
        self.inner.run_pending_tasks();
        self.inner.entry_count() as usize
    }

    /// Test whether the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Test membership
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Look up an entry without counting a hit or miss
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    /// Look up an entry and mark it most recently used
    pub fn get(&mut self, key: &K) -> Option<V> {
        let found = self.inner.get(key);
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Insert or replace an entry
    ///
    /// Replacing never counts as an eviction.
    pub fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    /// Retrieve cached result or compute and store new one
    ///
    /// The closure runs only when the key is not already cached.
    pub fn get_or_insert_with<F>(&mut self, key: K, compute_fn: F) -> V
    where
        F: FnOnce() -> V,
    {
        let entry = self.inner.entry(key).or_insert_with(compute_fn);
        if entry.is_fresh() {
            self.misses += 1;
        } else {
            self.hits += 1;
        }
        entry.into_value()
    }

    /// Remove an entry, returning its value
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain<F>(&self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<Arc<K>> = self
            .inner
            .iter()
            .filter(|(key, value)| !keep(key, value))
            .map(|(key, _)| key)
            .collect();
        for key in doomed {
            self.inner.invalidate(&*key);
        }
    }

    /// Drop every entry, keeping statistics
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Hit, miss and eviction counts so far
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
