//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with its payload and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached payload
    pub data: T,
    /// Creation instant (monotonic)
    pub created_at: Instant,
    /// Time-to-live for this entry
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is still valid while the elapsed time is
    /// less than or equal to its TTL, and expired only once it is strictly
    /// greater.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a given instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > self.ttl
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.created_at.elapsed())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("payload", Duration::from_secs(60));

        assert_eq!(entry.data, "payload");
        assert_eq!(entry.ttl, Duration::from_secs(60));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(1u32, Duration::from_millis(10));
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(20));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new((), Duration::from_secs(10));

        let remaining = entry.ttl_remaining();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new((), Duration::from_millis(100));

        // Exactly at the TTL the entry is still valid
        assert!(!entry.is_expired_at(entry.created_at + Duration::from_millis(100)));
        assert!(entry.is_expired_at(entry.created_at + Duration::from_millis(101)));
    }

    #[test]
    fn test_zero_ttl_valid_at_creation_instant() {
        let entry = CacheEntry::new((), Duration::ZERO);
        assert!(!entry.is_expired_at(entry.created_at));
    }
}
