//! Cache Module
//!
//! Provides in-memory response caching with per-entry TTL expiration.

mod cached_call;
mod entry;
mod stats;
mod store;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

// Re-export public types
pub use cached_call::cached_call;
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::ResponseCache;

// == Public Constants ==
/// TTL applied when none is given: five minutes
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Interval between background sweeps: ten minutes
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Response cache shared between the session and the sweep task.
pub type SharedCache<V> = Arc<RwLock<ResponseCache<V>>>;
