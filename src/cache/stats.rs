//! Response cache counters.

use serde::Serialize;

// == Cache Stats ==
/// Lookup and expiry counters of a [`ResponseCache`](super::ResponseCache).
///
/// Counters only grow; `entries` is a snapshot taken when the stats are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing fresh
    pub misses: u64,
    /// Entries evicted because their TTL elapsed, lazily or by a sweep
    pub expirations: u64,
    /// Live entries at snapshot time
    pub entries: usize,
}

impl CacheStats {
    /// Total number of lookups.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups served from the cache, 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub(crate) fn set_entries(&mut self, count: usize) {
        self.entries = count;
    }
}
