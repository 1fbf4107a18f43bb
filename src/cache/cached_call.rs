//! Cached Call
//!
//! Memoizes an async fetch behind the response cache.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::ResponseCache;

/// Returns the cached value for `key`, or awaits `producer` and caches its
/// result.
///
/// The lock is released while `producer` runs, so concurrent misses on the
/// same key each call their own producer and the last write wins. A failed
/// producer leaves the cache untouched and its error is returned as is.
///
/// # Arguments
/// * `cache` - Shared response cache
/// * `key` - Cache key chosen by the caller
/// * `producer` - Fetch to run on a miss
/// * `ttl` - Optional TTL for the stored result (cache default if None)
pub async fn cached_call<V, E, F, Fut>(
    cache: &RwLock<ResponseCache<V>>,
    key: &str,
    producer: F,
    ttl: Option<Duration>,
) -> Result<V, E>
where
    V: Clone,
    E: Display,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    // Write lock: a lookup may evict
    let cached = cache.write().await.get(key);
    if let Some(value) = cached {
        debug!("Cache hit for key: {}", key);
        return Ok(value);
    }

    debug!("Cache miss for key: {}, fetching", key);
    match producer().await {
        Ok(value) => {
            cache.write().await.set(key, value.clone(), ttl);
            Ok(value)
        }
        Err(err) => {
            warn!("Fetch failed for key {}: {}", key, err);
            Err(err)
        }
    }
}
