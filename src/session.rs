//! Session Module
//!
//! Explicitly constructed context owning the cart, the response cache, the
//! API client and the auth state for one storefront session.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::auth::Auth;
use crate::cache::{cached_call, ResponseCache, SharedCache};
use crate::cart::CartStore;
use crate::commerce::{OrderSummary, PricingPolicy};
use crate::config::Config;
use crate::error::{Result, StorefrontError};
use crate::models::{
    MessageResponse, OrderConfirmation, ProductCreated, ProductDetail, ProductInput,
    ProductSummary,
};
use crate::storage::Storage;
use crate::tasks::spawn_cleanup_task;

// == Cache Keys ==
/// Key of the cached product listing
pub const PRODUCTS_KEY: &str = "products";

/// Prefix of cached product details, followed by the product id
pub const PRODUCT_KEY_PREFIX: &str = "product:";

/// Returns the cache key for the detail of product `id`.
pub fn product_key(id: u64) -> String {
    format!("{PRODUCT_KEY_PREFIX}{id}")
}

// == Cached Response ==
/// Payloads the session keeps in its response cache.
#[derive(Debug, Clone)]
pub enum CachedResponse {
    Products(Vec<ProductSummary>),
    Product(Box<ProductDetail>),
}

impl CachedResponse {
    fn into_products(self) -> Option<Vec<ProductSummary>> {
        match self {
            CachedResponse::Products(products) => Some(products),
            _ => None,
        }
    }

    fn into_product(self) -> Option<ProductDetail> {
        match self {
            CachedResponse::Product(product) => Some(*product),
            _ => None,
        }
    }
}

// == Session ==
/// One storefront session.
///
/// Created by [`Session::start`] and torn down by [`Session::shutdown`]
/// (or by dropping it), which also stops the background cache sweep.
#[derive(Debug)]
pub struct Session {
    config: Config,
    cart: CartStore,
    cache: SharedCache<CachedResponse>,
    api: ApiClient,
    auth: Auth,
    pricing: PricingPolicy,
    cleanup_handle: Option<JoinHandle<()>>,
}

impl Session {
    // == Lifecycle ==
    /// Starts a session: restores the cart from `storage`, builds the API
    /// client and cache, and spawns the cache sweep.
    pub async fn start(config: Config, storage: Arc<dyn Storage>) -> Result<Self> {
        let api = ApiClient::from_config(&config, storage.clone())?;
        let auth = Auth::new(api.clone(), storage.clone());
        let cart = CartStore::load(storage);

        let cache = Arc::new(RwLock::new(ResponseCache::new(config.default_ttl)));
        let cleanup_handle = spawn_cleanup_task(&cache, config.cleanup_interval);

        info!(
            "Session started: api={}, cart_lines={}, logged_in={}",
            api.base_url(),
            cart.len(),
            auth.is_logged_in()
        );

        Ok(Self {
            config,
            cart,
            cache,
            api,
            auth,
            pricing: PricingPolicy::default(),
            cleanup_handle: Some(cleanup_handle),
        })
    }

    /// Ends the session and stops the background sweep.
    pub fn shutdown(mut self) {
        self.stop_cleanup();
        info!("Session shut down");
    }

    fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
        }
    }

    // == Accessors ==
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &SharedCache<CachedResponse> {
        &self.cache
    }

    /// Replaces the tax and shipping policy used for order summaries.
    pub fn set_pricing(&mut self, pricing: PricingPolicy) {
        self.pricing = pricing;
    }

    /// Returns the cost breakdown for the current cart.
    pub fn order_summary(&self) -> OrderSummary {
        self.pricing.summarize(&self.cart)
    }

    // == Catalog ==
    /// Returns the product listing, from cache when fresh.
    pub async fn products(&self) -> Result<Vec<ProductSummary>> {
        let api = &self.api;
        self.cached(
            PRODUCTS_KEY,
            move || api.products(),
            CachedResponse::Products,
            CachedResponse::into_products,
        )
        .await
    }

    /// Returns the detail of product `id`, from cache when fresh.
    pub async fn product(&self, id: u64) -> Result<ProductDetail> {
        let api = &self.api;
        self.cached(
            &product_key(id),
            move || api.product(id),
            |product| CachedResponse::Product(Box::new(product)),
            CachedResponse::into_product,
        )
        .await
    }

    /// Drops every cached catalog response.
    pub async fn invalidate_catalog(&self) {
        let mut cache = self.cache.write().await;
        cache.delete(PRODUCTS_KEY);
        cache.delete_prefix(PRODUCT_KEY_PREFIX);
    }

    async fn cached<T, F, Fut>(
        &self,
        key: &str,
        fetch: F,
        wrap: fn(T) -> CachedResponse,
        unwrap: fn(CachedResponse) -> Option<T>,
    ) -> Result<T>
    where
        T: Clone,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let fetch = &fetch;
        let cached = cached_call(
            &self.cache,
            key,
            || async move { fetch().await.map(wrap) },
            None,
        )
        .await?;

        if let Some(value) = unwrap(cached) {
            return Ok(value);
        }

        warn!("Cache entry {} held another payload type, refetching", key);
        let fresh = fetch().await?;
        self.cache.write().await.set(key, wrap(fresh.clone()), None);
        Ok(fresh)
    }

    // == Checkout ==
    /// Places an order for the current cart and empties it on success.
    ///
    /// On failure the cart is left as it was and the error is returned.
    pub async fn checkout(&mut self) -> Result<OrderConfirmation> {
        if self.cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let confirmation = self.api.create_order(self.cart.items()).await?;
        info!(
            "Order placed: id={:?}, lines={}, total={}",
            confirmation.order_id,
            self.cart.len(),
            self.cart.total()
        );
        self.cart.clear_cart();
        Ok(confirmation)
    }

    // == Admin ==
    /// Creates a product and invalidates the cached catalog.
    pub async fn create_product(&self, input: &ProductInput) -> Result<ProductCreated> {
        if let Some(message) = input.validate_for_create() {
            return Err(StorefrontError::InvalidRequest(message));
        }
        let created = self.api.create_product(input).await?;
        self.invalidate_catalog().await;
        Ok(created)
    }

    /// Updates a product and invalidates the cached catalog.
    pub async fn update_product(&self, id: u64, input: &ProductInput) -> Result<MessageResponse> {
        let response = self.api.update_product(id, input).await?;
        self.invalidate_catalog().await;
        Ok(response)
    }

    /// Deletes a product and invalidates the cached catalog.
    pub async fn delete_product(&self, id: u64) -> Result<MessageResponse> {
        let response = self.api.delete_product(id).await?;
        self.invalidate_catalog().await;
        Ok(response)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}
