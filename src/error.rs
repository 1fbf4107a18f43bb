//! Error types for the storefront core
//!
//! Provides unified error handling using thiserror. Storage failures have
//! their own type because the cart store swallows them instead of
//! propagating.

use reqwest::StatusCode;
use thiserror::Error;

// == Storage Error Enum ==
/// Failure of the durable key-value storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failure (permissions, disk full)
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the value would exceed the backend's quota
    #[error("Storage quota exceeded writing '{key}': {size} bytes exceeds {limit} byte limit")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    /// Key cannot be mapped onto the backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

// == Storefront Error Enum ==
/// Caller-facing error type for remote calls and session operations.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Transport-level failure (connection refused, timeout, bad body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage failed on a path where the caller must know about it
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Input rejected before anything was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Checkout attempted with nothing in the cart
    #[error("Cart is empty")]
    EmptyCart,
}

impl StorefrontError {
    /// Returns the HTTP status for API errors, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            StorefrontError::Api { status, .. } => Some(*status),
            StorefrontError::Http(err) => err.status(),
            _ => None,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storefront core.
pub type Result<T> = std::result::Result<T, StorefrontError>;
