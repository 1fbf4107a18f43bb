//! Storefront - client-side core of an online shop
//!
//! Runs a session against the configured API: restores the persisted cart,
//! warms the catalog cache and keeps the cache sweep running until shutdown.

use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::commerce::format_price;
use storefront::{Config, FileStorage, Session};

/// Main entry point for the storefront session.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open durable storage and start the session
/// 4. Warm the catalog cache
/// 5. Wait for SIGINT/SIGTERM and shut the session down
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" for this crate, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storefront session");

    let config = Config::from_env();
    info!(
        "Configuration loaded: api_url={}, default_ttl={}s, cleanup_interval={}s, storage_dir={}",
        config.api_url,
        config.default_ttl.as_secs(),
        config.cleanup_interval.as_secs(),
        config.storage_dir.display()
    );

    let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
    let session = Session::start(config, storage).await?;

    let summary = session.order_summary();
    info!(
        "Cart restored: {} item(s), subtotal {}",
        summary.item_count,
        format_price(summary.subtotal)
    );
    if let Some(user) = session.auth().current_user() {
        info!("Signed in as {}", user.email);
    }

    match session.products().await {
        Ok(products) => info!("Catalog cached: {} product(s)", products.len()),
        Err(e) => warn!("Catalog warm-up failed: {}", e),
    }

    shutdown_signal().await;
    session.shutdown();

    info!("Storefront session closed");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
