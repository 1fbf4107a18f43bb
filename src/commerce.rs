//! Commerce helpers: price formatting and order totals.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::cart::CartStore;

/// Currency code shown next to prices
pub const CURRENCY: &str = "TND";

/// Decimal places used when displaying prices
pub const PRICE_DECIMALS: u32 = 3;

/// Tax and shipping applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Fraction of the subtotal charged as tax (0.19 for 19%)
    pub tax_rate: Decimal,
    /// Flat shipping cost, ignored when shipping is free
    pub shipping_cost: Decimal,
    pub free_shipping: bool,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            free_shipping: true,
        }
    }
}

impl PricingPolicy {
    pub fn calculate_tax(&self, subtotal: Decimal) -> Decimal {
        subtotal.saturating_mul(self.tax_rate)
    }

    pub fn shipping(&self) -> Decimal {
        if self.free_shipping {
            Decimal::ZERO
        } else {
            self.shipping_cost
        }
    }

    /// Subtotal plus tax plus shipping, saturating at [`Decimal::MAX`].
    pub fn calculate_total(&self, subtotal: Decimal) -> Decimal {
        subtotal
            .saturating_add(self.calculate_tax(subtotal))
            .saturating_add(self.shipping())
    }

    /// Breaks down what checking out `cart` would cost.
    pub fn summarize(&self, cart: &CartStore) -> OrderSummary {
        let subtotal = cart.total();
        OrderSummary {
            item_count: cart.item_count(),
            subtotal,
            tax: self.calculate_tax(subtotal),
            shipping: self.shipping(),
            total: self.calculate_total(subtotal),
        }
    }
}

/// Cost breakdown shown on the cart and checkout pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Formats a price as `12.500 TND`.
pub fn format_price(price: Decimal) -> String {
    let rounded =
        price.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*} {}", PRICE_DECIMALS as usize, rounded, CURRENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::storage::MemoryStorage;
    use std::str::FromStr;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec("24")), "24.000 TND");
        assert_eq!(format_price(dec("10.5")), "10.500 TND");
        assert_eq!(format_price(dec("0.12345")), "0.123 TND");
    }

    #[test]
    fn test_default_policy_is_free() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.calculate_total(dec("24.0")), dec("24.0"));
    }

    #[test]
    fn test_tax_and_shipping() {
        let policy = PricingPolicy {
            tax_rate: dec("0.19"),
            shipping_cost: dec("7"),
            free_shipping: false,
        };
        assert_eq!(policy.calculate_tax(dec("100")), dec("19"));
        assert_eq!(policy.calculate_total(dec("100")), dec("126"));
    }

    #[test]
    fn test_total_saturates_on_huge_subtotal() {
        let policy = PricingPolicy {
            tax_rate: dec("0.19"),
            shipping_cost: dec("7"),
            free_shipping: false,
        };
        assert_eq!(policy.calculate_total(Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_summarize_cart() {
        let mut cart = CartStore::load(Arc::new(MemoryStorage::new()));
        cart.add_item(CartItem::new(1, "A", dec("10.5"), 2));
        cart.add_item(CartItem::new(2, "B", dec("3.0"), 1));

        let summary = PricingPolicy::default().summarize(&cart);

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, dec("24"));
        assert_eq!(summary.total, dec("24"));
        assert_eq!(summary.shipping, Decimal::ZERO);
    }
}
