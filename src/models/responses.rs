//! Response DTOs for the storefront API
//!
//! Defines the structure of incoming HTTP response bodies. Prices arrive as
//! decimal strings and parse into [`Decimal`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;

/// Response body for `POST /login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Generic `{"msg": ...}` body returned by mutations and errors
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub msg: Option<String>,
}

/// Catalog entry as listed by `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub cover_url: Option<String>,
}

impl ProductSummary {
    /// Returns true if at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Captures this product as a new cart line.
    pub fn to_cart_item(&self, quantity: u32) -> CartItem {
        let item = CartItem::new(self.id, self.title.clone(), self.price, quantity);
        match &self.cover_url {
            Some(url) => item.with_cover_url(url.clone()),
            None => item,
        }
    }
}

/// Full product as returned by `GET /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductDetail {
    /// Returns true if at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Captures this product as a new cart line, using the first image as
    /// the cover.
    pub fn to_cart_item(&self, quantity: u32) -> CartItem {
        let item = CartItem::new(self.id, self.title.clone(), self.price, quantity);
        match self.images.first() {
            Some(url) => item.with_cover_url(url.clone()),
            None => item,
        }
    }
}

/// Response body for `POST /admin/products`
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreated {
    #[serde(default)]
    pub msg: Option<String>,
    pub id: u64,
}

/// Response body for `POST /orders`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderConfirmation {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// Order as listed by `GET /orders`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Line of the server-side cart mirror
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerCartItem {
    pub id: u64,
    pub product_id: u64,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Response body for `GET /cart`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerCart {
    pub items: Vec<ServerCartItem>,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_product_summary_parses_string_price() {
        let json = r#"{
            "id": 3,
            "title": "Clay Vase",
            "slug": "clay-vase",
            "description": null,
            "price": "45.500",
            "stock": 2,
            "cover_url": "http://localhost:5000/uploads/vase.png"
        }"#;
        let product: ProductSummary = serde_json::from_str(json).unwrap();

        assert_eq!(product.price, Decimal::from_str("45.5").unwrap());
        assert!(product.in_stock());
        assert!(product.description.is_none());
    }

    #[test]
    fn test_product_summary_to_cart_item() {
        let product = ProductSummary {
            id: 9,
            title: "Scarf".to_string(),
            slug: "scarf".to_string(),
            description: None,
            price: Decimal::new(30, 0),
            stock: 0,
            cover_url: Some("/scarf.png".to_string()),
        };

        let item = product.to_cart_item(0);

        assert_eq!(item.product_id, 9);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.cover_url.as_deref(), Some("/scarf.png"));
        assert!(!product.in_stock());
    }

    #[test]
    fn test_product_detail_uses_first_image() {
        let json = r#"{"id":1,"title":"Rug","price":"10","stock":1,"images":["/a.png","/b.png"]}"#;
        let product: ProductDetail = serde_json::from_str(json).unwrap();

        let item = product.to_cart_item(2);
        assert_eq!(item.cover_url.as_deref(), Some("/a.png"));
        assert_eq!(item.checked_line_total(), Some(Decimal::new(20, 0)));
    }

    #[test]
    fn test_server_cart_parses() {
        let json = r#"{
            "items": [{"id":1,"product_id":4,"title":"Tea","quantity":2,"unit_price":"3.50"}],
            "total": "7.00"
        }"#;
        let cart: ServerCart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, Decimal::new(7, 0));
    }

    #[test]
    fn test_order_confirmation_tolerates_missing_fields() {
        let confirmation: OrderConfirmation = serde_json::from_str(r#"{"msg":"ok"}"#).unwrap();
        assert_eq!(confirmation.msg.as_deref(), Some("ok"));
        assert!(confirmation.order_id.is_none());
    }
}
