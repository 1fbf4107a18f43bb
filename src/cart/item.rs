//! Cart Item Module
//!
//! Defines a single line in the shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest quantity a cart line may hold
pub const MIN_QUANTITY: u32 = 1;

// == Cart Item ==
/// One line in the cart.
///
/// `id` identifies the line, not the product, so two lines may point at the
/// same product. Title and price are captured when the line is created and
/// are never re-fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Line identifier
    pub id: Uuid,
    /// Identifier of the underlying product
    pub product_id: u64,
    /// Display name at add-time
    pub title: String,
    /// Unit price at add-time
    pub price: Decimal,
    /// Number of units, never below [`MIN_QUANTITY`]
    pub quantity: u32,
    /// Optional image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl CartItem {
    // == Constructor ==
    /// Creates a line with a fresh random id.
    ///
    /// `quantity` is clamped to at least 1 and a negative `price` to zero.
    pub fn new(product_id: u64, title: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            title: title.into(),
            price: price.max(Decimal::ZERO),
            quantity: quantity.max(MIN_QUANTITY),
            cover_url: None,
        }
    }

    /// Sets the cover image reference.
    pub fn with_cover_url(mut self, url: impl Into<String>) -> Self {
        self.cover_url = Some(url.into());
        self
    }

    // == Line Total ==
    /// Returns `price * quantity`, or `None` if it overflows a [`Decimal`].
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Restores the quantity and price invariants on data from outside the
    /// store (persisted JSON, for instance).
    pub(crate) fn normalized(mut self) -> Self {
        self.quantity = self.quantity.max(MIN_QUANTITY);
        self.price = self.price.max(Decimal::ZERO);
        self
    }
}

/// Clamps a requested quantity into the valid range.
pub fn clamp_quantity(requested: i64) -> u32 {
    if requested < i64::from(MIN_QUANTITY) {
        MIN_QUANTITY
    } else {
        u32::try_from(requested).unwrap_or(u32::MAX)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_clamps_zero_quantity() {
        let item = CartItem::new(1, "Vase", Decimal::new(1000, 2), 0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_new_clamps_negative_price() {
        let item = CartItem::new(1, "Vase", Decimal::new(-5, 0), 1);
        assert_eq!(item.price, Decimal::ZERO);
    }

    #[test]
    fn test_new_generates_distinct_ids() {
        let a = CartItem::new(7, "Scarf", Decimal::ONE, 1);
        let b = CartItem::new(7, "Scarf", Decimal::ONE, 1);
        assert_ne!(a.id, b.id);
        assert_eq!(a.product_id, b.product_id);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new(1, "Mug", Decimal::from_str("10.5").unwrap(), 2);
        assert_eq!(
            item.checked_line_total(),
            Some(Decimal::from_str("21.0").unwrap())
        );
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let item = CartItem::new(1, "Gold", Decimal::MAX, 2);
        assert_eq!(item.checked_line_total(), None);
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(-3), 1);
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(42), 42);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_serializes_camel_case() {
        let item = CartItem::new(3, "Rug", Decimal::new(25, 0), 1).with_cover_url("/img/rug.png");
        let json = serde_json::to_string(&item).unwrap();

        assert!(json.contains("\"productId\":3"));
        assert!(json.contains("\"coverUrl\":\"/img/rug.png\""));
        assert!(json.contains("\"price\":\"25\""));
    }

    #[test]
    fn test_deserialize_accepts_numeric_price() {
        let json = r#"{
            "id": "6f1c2f1e-7a44-4c3e-9d0b-2a8e5f3c9b11",
            "productId": 4,
            "title": "Lamp",
            "price": 12.25,
            "quantity": 3
        }"#;
        let item: CartItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.price, Decimal::from_str("12.25").unwrap());
        assert!(item.cover_url.is_none());
    }

    #[test]
    fn test_normalized_restores_invariants() {
        let mut item = CartItem::new(1, "Bowl", Decimal::ONE, 1);
        item.quantity = 0;
        item.price = Decimal::new(-1, 0);

        let item = item.normalized();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, Decimal::ZERO);
    }
}
