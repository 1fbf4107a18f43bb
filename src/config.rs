//! Configuration Module
//!
//! Handles loading and managing session configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{DEFAULT_CLEANUP_INTERVAL, DEFAULT_TTL};

/// Session configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the storefront API
    pub api_url: String,
    /// Default TTL for cached API responses
    pub default_ttl: Duration,
    /// Interval between background cache sweeps
    pub cleanup_interval: Duration,
    /// Per-request timeout for API calls
    pub request_timeout: Duration,
    /// Directory backing durable storage
    pub storage_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_URL` - API base URL (default: http://localhost:5000/api)
    /// - `DEFAULT_TTL` - Cache TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Cache sweep frequency in seconds (default: 600)
    /// - `REQUEST_TIMEOUT` - API request timeout in seconds (default: 10)
    /// - `STORAGE_DIR` - Durable storage directory (default: .storefront)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_url),
            default_ttl: secs_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            cleanup_interval: secs_var("CLEANUP_INTERVAL")
                .filter(|d| !d.is_zero())
                .unwrap_or(defaults.cleanup_interval),
            request_timeout: secs_var("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
            storage_dir: env::var("STORAGE_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
        }
    }
}

fn secs_var(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            default_ttl: DEFAULT_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            request_timeout: Duration::from_secs(10),
            storage_dir: PathBuf::from(".storefront"),
        }
    }
}
