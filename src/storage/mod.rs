//! Storage Module
//!
//! Durable text key-value storage used to persist the cart, the access token
//! and the user record between sessions.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{self, StorageError};

// == Persisted Keys ==
/// Key holding the serialized cart item sequence
pub const CART_KEY: &str = "cart";

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "access_token";

/// Key holding the logged-in user record
pub const USER_KEY: &str = "user";

// == Storage Trait ==
/// Durable string storage addressed by key.
///
/// Values are opaque text; callers store JSON.
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// == JSON Helpers ==
/// Reads and decodes the JSON value stored under `key`.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> error::Result<Option<T>> {
    match storage.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> error::Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)?;
    Ok(())
}
