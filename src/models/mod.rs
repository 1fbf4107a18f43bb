//! Request and Response models for the storefront API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    AddToCartRequest, CreateOrderRequest, LoginRequest, ProductInput, RegisterRequest,
    UpdateCartRequest,
};
pub use responses::{
    LoginResponse, MessageResponse, Order, OrderConfirmation, ProductCreated, ProductDetail,
    ProductSummary, ServerCart, ServerCartItem,
};
