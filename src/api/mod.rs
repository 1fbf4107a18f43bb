//! API Module
//!
//! HTTP client for the remote storefront REST API.
//!
//! # Endpoints
//! - `POST /register`, `POST /login` - Account creation and sign-in
//! - `GET /products`, `GET /products/{id}` - Catalog reads
//! - `POST /orders`, `GET /orders[/{id}]` - Orders
//! - `GET|POST|PATCH|DELETE /cart[/{id}]` - Optional server-side cart mirror
//! - `POST|PUT|DELETE /admin/products[/{id}]` - Product management

pub mod client;

pub use client::ApiClient;
