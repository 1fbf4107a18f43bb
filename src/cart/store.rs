//! Cart Store Module
//!
//! Authoritative in-memory cart with write-through persistence and change
//! notifications.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cart::item::clamp_quantity;
use crate::cart::CartItem;
use crate::error::StorageError;
use crate::storage::{Storage, CART_KEY};

// == Cart Snapshot ==
/// Immutable view of the cart published to subscribers after each mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    /// Lines in insertion order
    pub items: Vec<CartItem>,
    /// Sum of `price * quantity` over `items`
    pub total: Decimal,
}

// == Cart Store ==
/// Shopping cart for the current session.
///
/// Every mutation recomputes the total, persists the item sequence under
/// [`CART_KEY`] and notifies subscribers. Persistence failures are logged
/// and kept in [`CartStore::last_persist_error`], never returned.
pub struct CartStore {
    /// Lines in insertion order
    items: Vec<CartItem>,
    /// Derived total, recomputed on every mutation
    total: Decimal,
    /// Durable backend
    storage: Arc<dyn Storage>,
    /// Change notification channel
    notifier: watch::Sender<CartSnapshot>,
    /// Most recent persistence failure, cleared by the next successful write
    last_persist_error: Option<String>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("total", &self.total)
            .field("last_persist_error", &self.last_persist_error)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    // == Constructor ==
    /// Creates a store from whatever is persisted in `storage`.
    ///
    /// Missing, unreadable or corrupt data yields an empty cart.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let (items, total) = match read_items(storage.as_ref()) {
            Ok(loaded) => loaded,
            Err(reason) => {
                warn!("Persisted cart unusable, starting empty: {}", reason);
                (Vec::new(), Decimal::ZERO)
            }
        };

        let (notifier, _) = watch::channel(CartSnapshot {
            items: items.clone(),
            total,
        });

        debug!("Cart loaded with {} line(s), total {}", items.len(), total);

        Self {
            items,
            total,
            storage,
            notifier,
            last_persist_error: None,
        }
    }

    // == Add Item ==
    /// Appends a line to the end of the cart.
    ///
    /// A line whose id is already in the cart, or whose addition would push
    /// the total past [`Decimal::MAX`], is dropped with a warning.
    pub fn add_item(&mut self, item: CartItem) {
        if self.get(item.id).is_some() {
            warn!("Cart already holds line {}, ignoring duplicate", item.id);
            return;
        }

        let mut items = self.items.clone();
        items.push(item.normalized());
        self.apply(items);
    }

    // == Remove Item ==
    /// Removes the line with `id`. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: Uuid) {
        if self.get(id).is_none() {
            return;
        }

        let mut items = self.items.clone();
        items.retain(|item| item.id != id);
        self.apply(items);
    }

    // == Update Quantity ==
    /// Sets the quantity of the line with `id`, clamping anything below 1
    /// up to 1. Unknown ids are ignored.
    ///
    /// A quantity that would push the total past [`Decimal::MAX`] leaves the
    /// cart unchanged, with a warning.
    pub fn update_quantity(&mut self, id: Uuid, quantity: i64) {
        let quantity = clamp_quantity(quantity);
        let mut items = self.items.clone();
        if let Some(item) = items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
            self.apply(items);
        }
    }

    // == Clear ==
    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.apply(Vec::new());
    }

    // == Accessors ==
    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the line with `id`, if present.
    pub fn get(&self, id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the sum of `price * quantity` over all lines.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Returns the current state as a snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total,
        }
    }

    /// Subscribes to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.notifier.subscribe()
    }

    /// Returns the message of the most recent failed write, if the last
    /// write failed.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    // == Write Path ==
    /// Replaces the lines with `items`, then persists and notifies. Called
    /// by every mutation.
    /// The cart is left untouched if the total of `items` overflows.
    fn apply(&mut self, items: Vec<CartItem>) {
        let Some(total) = checked_total(&items) else {
            warn!("Cart total would overflow, change rejected");
            return;
        };

        self.items = items;
        self.total = total;
        self.persist();
        self.notifier.send_replace(self.snapshot());
    }

    /// Writes the item sequence through to storage.
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.items)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set(CART_KEY, &json)
                    .map_err(|e: StorageError| e.to_string())
            });

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(reason) => {
                warn!("Failed to persist cart, keeping in-memory state: {}", reason);
                self.last_persist_error = Some(reason);
            }
        }
    }
}

// == Helpers ==
/// Sums `price * quantity` over `items`, or `None` on overflow.
fn checked_total(items: &[CartItem]) -> Option<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        total.checked_add(item.checked_line_total()?)
    })
}

fn read_items(storage: &dyn Storage) -> Result<(Vec<CartItem>, Decimal), String> {
    let Some(raw) = storage.get(CART_KEY).map_err(|e| e.to_string())? else {
        return Ok((Vec::new(), Decimal::ZERO));
    };

    let items: Vec<CartItem> = serde_json::from_str(&raw).map_err(|e| e.to_string())?;

    // Keep the first occurrence of any duplicated line id
    let mut seen = std::collections::HashSet::new();
    let items: Vec<CartItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.id))
        .map(CartItem::normalized)
        .collect();

    let total = checked_total(&items).ok_or_else(|| "cart total overflows".to_string())?;
    Ok((items, total))
}
