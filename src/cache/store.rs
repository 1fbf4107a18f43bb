//! Response Cache Module
//!
//! Keyed store of API responses where every entry carries its own TTL.
//! Expired entries are evicted lazily on read and in bulk by `cleanup`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, DEFAULT_TTL};

// == Response Cache ==
/// Generic key-to-value cache with per-entry expiration.
#[derive(Debug)]
pub struct ResponseCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Lookup and eviction counters
    stats: CacheStats,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V> ResponseCache<V> {
    // == Constructor ==
    /// Creates an empty cache with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
            default_ttl,
        }
    }

    // == Set ==
    /// Stores `data` under `key`, overwriting any previous entry and
    /// restarting its clock.
    ///
    /// # Arguments
    /// * `key` - The cache key
    /// * `data` - The payload
    /// * `ttl` - Optional TTL (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, data: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key.into(), CacheEntry::new(data, ttl));
        self.stats.set_entries(self.entries.len());
    }

    // == Delete ==
    /// Removes the entry for `key`. Absent keys are ignored.
    pub fn delete(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.stats.set_entries(self.entries.len());
        }
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_entries(0);
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_entries(self.entries.len());
        removed
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn delete_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        self.stats.set_entries(self.entries.len());
        before - self.entries.len()
    }

    /// Returns true if `key` holds an entry, expired or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Default TTL ==
    /// Returns the TTL used when `set` receives none.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Changes the TTL used by later `set` calls. Existing entries keep theirs.
    pub fn set_default_ttl(&mut self, ttl: Duration) {
        self.default_ttl = ttl;
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet
    /// evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> ResponseCache<V> {
    // == Get ==
    /// Returns a clone of the value for `key` if present and not expired.
    ///
    /// An expired entry is evicted and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_entries(self.entries.len());
        }
        self.stats.record_miss();
        None
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn new_cache() -> ResponseCache<String> {
        ResponseCache::new(Duration::from_secs(300))
    }

    #[test]
    fn test_cache_new() {
        let cache = new_cache();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.default_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_default_uses_five_minutes() {
        let cache: ResponseCache<u8> = ResponseCache::default();
        assert_eq!(cache.default_ttl(), Duration::from_secs(5 * 60));
    }

    #[test]
    fn test_set_and_get() {
        let mut cache = new_cache();

        cache.set("products", "[1,2]".to_string(), None);

        assert_eq!(cache.get("products").as_deref(), Some("[1,2]"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let mut cache = new_cache();
        assert!(cache.get("nope").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_overwrite() {
        let mut cache = new_cache();

        cache.set("k", "v1".to_string(), None);
        cache.set("k", "v2".to_string(), Some(Duration::from_secs(1)));

        assert_eq!(cache.get("k").as_deref(), Some("v2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_delete() {
        let mut cache = new_cache();
        cache.set("k", "v".to_string(), None);

        cache.delete("k");
        cache.delete("k");

        assert!(cache.is_empty());
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_clear() {
        let mut cache = new_cache();
        cache.set("a", "1".to_string(), None);
        cache.set("b", "2".to_string(), None);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_expired_get_evicts() {
        let mut cache = new_cache();
        cache.set("short", "v".to_string(), Some(Duration::from_millis(10)));
        cache.set("long", "v".to_string(), None);
        assert_eq!(cache.len(), 2);

        sleep(Duration::from_millis(20));

        assert!(cache.get("short").is_none());
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains_key("short"));
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_cleanup_removes_only_expired() {
        let mut cache = new_cache();
        cache.set("a", "1".to_string(), Some(Duration::from_millis(10)));
        cache.set("b", "2".to_string(), Some(Duration::from_millis(10)));
        cache.set("c", "3".to_string(), Some(Duration::from_secs(60)));

        sleep(Duration::from_millis(20));

        assert_eq!(cache.cleanup(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("c").as_deref(), Some("3"));
        assert_eq!(cache.cleanup(), 0);
    }

    #[test]
    fn test_reset_after_expiry_is_valid_again() {
        let mut cache = new_cache();
        cache.set("k", "old".to_string(), Some(Duration::from_millis(10)));
        sleep(Duration::from_millis(20));

        cache.set("k", "new".to_string(), None);

        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn test_set_default_ttl_applies_to_later_sets() {
        let mut cache = new_cache();
        cache.set("before", "v".to_string(), None);
        cache.set_default_ttl(Duration::from_millis(10));
        cache.set("after", "v".to_string(), None);

        sleep(Duration::from_millis(20));

        assert!(cache.get("before").is_some());
        assert!(cache.get("after").is_none());
    }

    #[test]
    fn test_delete_prefix() {
        let mut cache = new_cache();
        cache.set("product:1", "a".to_string(), None);
        cache.set("product:2", "b".to_string(), None);
        cache.set("products", "c".to_string(), None);

        assert_eq!(cache.delete_prefix("product:"), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("products"));
    }

    #[test]
    fn test_stats() {
        let mut cache = new_cache();
        cache.set("k", "v".to_string(), None);
        cache.get("k");
        cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }
}
