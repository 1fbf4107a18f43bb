//! Cart Module
//!
//! Client-side shopping cart: line items, derived total, write-through
//! persistence.

mod item;
mod store;


pub use item::{clamp_quantity, CartItem, MIN_QUANTITY};
pub use store::{CartSnapshot, CartStore};
