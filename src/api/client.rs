//! API Client
//!
//! Typed HTTP client for the storefront REST API. Every request carries the
//! stored access token as a bearer credential when one is present.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cart::CartItem;
use crate::config::Config;
use crate::error::{Result, StorefrontError};
use crate::models::{
    AddToCartRequest, CreateOrderRequest, LoginRequest, LoginResponse, MessageResponse, Order,
    OrderConfirmation, ProductCreated, ProductDetail, ProductInput, ProductSummary,
    RegisterRequest, ServerCart, UpdateCartRequest,
};
use crate::storage::{read_json, Storage, TOKEN_KEY};

// == Api Client ==
/// Client for the remote storefront API.
///
/// Cheap to clone; clones share the connection pool and storage.
#[derive(Clone)]
pub struct ApiClient {
    /// Pooled HTTP client
    http: reqwest::Client,
    /// Base URL without trailing slash, e.g. `http://localhost:5000/api`
    base_url: String,
    /// Storage holding the access token
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    // == Constructor ==
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        storage: Arc<dyn Storage>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            storage,
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config, storage: Arc<dyn Storage>) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout, storage)
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Auth ==
    /// `POST /register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse> {
        self.send(self.request(Method::POST, "/register").json(request))
            .await
    }

    /// `POST /login`, returning the issued access token.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.send(self.request(Method::POST, "/login").json(request))
            .await
    }

    // == Catalog ==
    /// `GET /products`
    pub async fn products(&self) -> Result<Vec<ProductSummary>> {
        self.get("/products").await
    }

    /// `GET /products/{id}`
    pub async fn product(&self, id: u64) -> Result<ProductDetail> {
        self.get(&format!("/products/{id}")).await
    }

    // == Orders ==
    /// `POST /orders` with the given cart lines.
    pub async fn create_order(&self, items: &[CartItem]) -> Result<OrderConfirmation> {
        self.post("/orders", &CreateOrderRequest { items }).await
    }

    /// `GET /orders`
    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.get("/orders").await
    }

    /// `GET /orders/{id}`
    pub async fn order(&self, id: u64) -> Result<Order> {
        self.get(&format!("/orders/{id}")).await
    }

    // == Server Cart Mirror ==
    /// `GET /cart`
    pub async fn server_cart(&self) -> Result<ServerCart> {
        self.get("/cart").await
    }

    /// `POST /cart`
    pub async fn add_to_server_cart(
        &self,
        product_id: u64,
        quantity: u32,
    ) -> Result<MessageResponse> {
        self.post(
            "/cart",
            &AddToCartRequest {
                product_id,
                quantity,
            },
        )
        .await
    }

    /// `PATCH /cart/{id}`
    pub async fn update_server_cart_item(
        &self,
        id: u64,
        quantity: u32,
    ) -> Result<MessageResponse> {
        self.send(
            self.request(Method::PATCH, &format!("/cart/{id}"))
                .json(&UpdateCartRequest { quantity }),
        )
        .await
    }

    /// `DELETE /cart/{id}`
    pub async fn remove_server_cart_item(&self, id: u64) -> Result<MessageResponse> {
        self.delete(&format!("/cart/{id}")).await
    }

    // == Admin ==
    /// `POST /admin/products`
    pub async fn create_product(&self, input: &ProductInput) -> Result<ProductCreated> {
        self.post("/admin/products", input).await
    }

    /// `PUT /admin/products/{id}`, applying only the fields set in `input`.
    pub async fn update_product(
        &self,
        id: u64,
        input: &ProductInput,
    ) -> Result<MessageResponse> {
        self.send(
            self.request(Method::PUT, &format!("/admin/products/{id}"))
                .json(input),
        )
        .await
    }

    /// `DELETE /admin/products/{id}`
    pub async fn delete_product(&self, id: u64) -> Result<MessageResponse> {
        self.delete(&format!("/admin/products/{id}")).await
    }

    // == Request Plumbing ==
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Builds a request for `path`, attaching the bearer token if stored.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Reads the access token. Unreadable storage counts as no token.
    fn token(&self) -> Option<String> {
        match read_json::<String>(self.storage.as_ref(), TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read access token, sending unauthenticated: {}", e);
                None
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turns a non-success response into [`StorefrontError::Api`], using the
/// body's `msg` field as the message when there is one.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&body)
        .ok()
        .and_then(|m| m.msg)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    Err(StorefrontError::Api { status, message })
}
