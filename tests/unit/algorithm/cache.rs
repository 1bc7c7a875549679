//! Tests for `BoundedCache` hit/miss tracking and least-recently-used eviction

#[cfg(test)]
mod tests {
    use tiledescramble::algorithm::cache::{BoundedCache, CacheStats};

    // Verifies new cache starts with 0 hits and 0 misses
    // Verified by initializing cache with non-zero hit and miss counts
    #[test]
    fn test_cache_new() {
        let cache: BoundedCache<u32, u32> = BoundedCache::new(4);
        assert_eq!(cache.stats(), CacheStats::default());
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 4);
    }

    // Zero capacity behaves as capacity one
    #[test]
    fn test_zero_capacity_holds_one_entry() {
        let cache = BoundedCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert(1, "a");
        cache.insert(2, "b");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 1);
    }

    // Tests cache miss on first access and hit on second
    // Verified by removing hit counter increment logic
    #[test]
    fn test_get_or_insert_with_miss_then_hit() {
        let mut cache = BoundedCache::new(4);
        let mut compute_count = 0;

        let first = cache.get_or_insert_with("key", || {
            compute_count += 1;
            5
        });
        let second = cache.get_or_insert_with("key", || {
            compute_count += 1;
            99
        });

        assert_eq!(first, 5);
        assert_eq!(second, 5);
        assert_eq!(compute_count, 1);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    // Least recently used entry is evicted first, not the newcomer
    // Verified by building the cache with the default admission policy
    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = BoundedCache::new(2);
        cache.insert(1, 10);
        cache.insert(2, 20);
        assert_eq!(cache.len(), 2);

        // Touch 1 so 2 becomes the oldest
        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.len(), 2);
        cache.insert(3, 30);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key(&1));
        assert!(!cache.contains_key(&2));
        assert!(cache.contains_key(&3));
        assert_eq!(cache.stats().evictions, 1);
    }

    // get_or_insert_with also evicts when full
    #[test]
    fn test_get_or_insert_with_respects_capacity() {
        let mut cache = BoundedCache::new(3);
        for key in 0..10 {
            cache.get_or_insert_with(key, || key * 2);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.stats().evictions, 7);
        assert_eq!(cache.peek(&9), Some(18));
        assert_eq!(cache.peek(&0), None);
    }

    // Replacing a value never counts as an eviction
    #[test]
    fn test_insert_replaces_existing() {
        let cache = BoundedCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 3);
        assert_eq!(cache.peek(&"a"), Some(3));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_peek_counts_nothing() {
        let cache = BoundedCache::new(2);
        cache.insert(1, 'a');
        assert_eq!(cache.peek(&1), Some('a'));
        assert_eq!(cache.peek(&2), None);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_get_counts_hits_and_misses() {
        let mut cache = BoundedCache::new(2);
        cache.insert("count", 1);
        assert_eq!(cache.get(&"count"), Some(1));
        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_remove_retain_and_clear() {
        let cache = BoundedCache::new(8);
        for key in 0..6 {
            cache.insert(key, key);
        }

        assert_eq!(cache.remove(&0), Some(0));
        assert_eq!(cache.remove(&0), None);

        cache.retain(|key, _| key % 2 == 1);
        assert_eq!(cache.len(), 3);
        assert!(cache.contains_key(&3));
        assert!(!cache.contains_key(&4));

        // Freed slots are reused before anything is evicted
        for key in 10..15 {
            cache.insert(key, key);
        }
        assert_eq!(cache.len(), 8);
        assert_eq!(cache.stats().evictions, 0);

        cache.clear();
        assert!(!cache.contains_key(&13));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions, 0);
    }
}
