//! Storefront - client-side core of an online shop
//!
//! Keeps a persisted shopping cart with a derived total, and a TTL response
//! cache in front of the shop's REST API.

pub mod api;
pub mod auth;
pub mod cache;
pub mod cart;
pub mod commerce;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
pub mod tasks;

pub use api::ApiClient;
pub use auth::{Auth, UserRecord};
pub use cache::{cached_call, CacheEntry, CacheStats, ResponseCache};
pub use cart::{CartItem, CartSnapshot, CartStore};
pub use commerce::{format_price, OrderSummary, PricingPolicy};
pub use config::Config;
pub use error::{Result, StorageError, StorefrontError};
pub use session::{CachedResponse, Session};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use tasks::spawn_cleanup_task;
