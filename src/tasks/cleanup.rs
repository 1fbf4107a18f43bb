//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task keeps only a weak reference to the cache: once every strong
/// reference is dropped it exits on its next tick. Owners should still abort
/// the returned handle when they shut down.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweeps
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(ResponseCache::<String>::default()));
/// let cleanup_handle = spawn_cleanup_task(&cache, Duration::from_secs(600));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(
    cache: &Arc<RwLock<ResponseCache<V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let weak: Weak<RwLock<ResponseCache<V>>> = Arc::downgrade(cache);

    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let Some(cache) = weak.upgrade() else {
                debug!("Cache dropped, stopping TTL cleanup task");
                break;
            };

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(
                    "TTL cleanup: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("TTL cleanup: no expired entries, {} remaining", remaining);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_cache() -> Arc<RwLock<ResponseCache<String>>> {
        Arc::new(RwLock::new(ResponseCache::new(Duration::from_secs(300))))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = new_cache();
        cache
            .write()
            .await
            .set("expire_soon", "value".to_string(), Some(Duration::from_millis(10)));

        let handle = spawn_cleanup_task(&cache, Duration::from_millis(30));

        tokio::time::sleep(Duration::from_millis(100)).await;

        // Swept without any get() touching it
        assert!(!cache.read().await.contains_key("expire_soon"));
        assert_eq!(cache.read().await.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = new_cache();
        cache
            .write()
            .await
            .set("long_lived", "value".to_string(), Some(Duration::from_secs(3600)));

        let handle = spawn_cleanup_task(&cache, Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(80)).await;

        let value = cache.write().await.get("long_lived");
        assert_eq!(value.as_deref(), Some("value"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = new_cache();

        let handle = spawn_cleanup_task(&cache, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }

    #[tokio::test]
    async fn test_cleanup_task_stops_when_cache_dropped() {
        let cache = new_cache();
        let handle = spawn_cleanup_task(&cache, Duration::from_millis(10));

        drop(cache);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("task should exit once the cache is gone")
            .unwrap();
    }
}
