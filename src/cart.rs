//! Session cart store.
//!
//! The cart is an explicitly owned object handed to whatever needs it.
//! Mutations go through `&mut self`, so a single owner serializes them; a
//! multi-threaded UI wraps the store in [`SharedCart`]. Observers register
//! with [`CartStore::subscribe`] and are called after every effective change.
//!
//! Line items are keyed by variant id: two sizes of the same product are two
//! rows, adding the same variant again bumps its quantity. Quantities are
//! always at least 1; deletion is removal, never a zero quantity.

use std::fmt;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{line_total, Product, Variant};

// ---------------------------------------------------------------------------
// CartLineItem
// ---------------------------------------------------------------------------

/// One cart row. Product fields are denormalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: u64,
    pub product_name: String,
    pub product_image: Option<String>,
    pub variant_id: u64,
    pub size: String,
    pub color: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product: &Product, variant: &Variant, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            product_image: product.main_image().map(str::to_string),
            variant_id: variant.id,
            size: variant.size.clone(),
            color: variant.color.clone(),
            price: variant.price,
            quantity: quantity.max(1),
        }
    }

    pub fn subtotal(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}

/// Serializable copy of the cart contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
}

/// Parse user-entered quantity text. Anything that is not a positive integer
/// counts as 1.
pub fn parse_quantity(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(n) => normalize_quantity(n),
        Err(_) => 1,
    }
}

fn normalize_quantity(quantity: i64) -> u32 {
    if quantity < 1 {
        1
    } else {
        u32::try_from(quantity).unwrap_or(u32::MAX)
    }
}

// ---------------------------------------------------------------------------
// CartStore
// ---------------------------------------------------------------------------

pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&CartStore) + Send>;

/// A cart shared across threads.
pub type SharedCart = Arc<Mutex<CartStore>>;

#[derive(Default)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedCart {
        Arc::new(Mutex::new(self))
    }

    // -- Mutations ---------------------------------------------------------

    /// Add `quantity` of a variant. An existing row for the same variant is
    /// incremented; otherwise a row is appended. Non-positive quantities
    /// count as 1. Returns the row's resulting quantity.
    pub fn add_item(&mut self, product: &Product, variant: &Variant, quantity: i64) -> u32 {
        self.add_line(CartLineItem::new(product, variant, normalize_quantity(quantity)))
    }

    /// Add a prepared line item, merging with an existing row by variant id.
    pub fn add_line(&mut self, line: CartLineItem) -> u32 {
        let variant_id = line.variant_id;
        let added = line.quantity.max(1);
        let quantity = match self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(added);
                existing.quantity
            }
            None => {
                self.items.push(CartLineItem {
                    quantity: added,
                    ..line
                });
                added
            }
        };
        debug!(variant_id, added, quantity, "cart add");
        self.notify();
        quantity
    }

    /// Set a row's quantity exactly. Below 1 removes the row. Returns whether
    /// the cart changed.
    pub fn update_quantity(&mut self, variant_id: u64, new_quantity: i64) -> bool {
        if new_quantity < 1 {
            return self.remove_item(variant_id);
        }
        let quantity = normalize_quantity(new_quantity);
        let Some(item) = self.items.iter_mut().find(|i| i.variant_id == variant_id) else {
            return false;
        };
        if item.quantity == quantity {
            return false;
        }
        item.quantity = quantity;
        debug!(variant_id, quantity, "cart update");
        self.notify();
        true
    }

    /// Delete the row for `variant_id`. Missing ids are a no-op.
    pub fn remove_item(&mut self, variant_id: u64) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.variant_id != variant_id);
        let removed = self.items.len() < len_before;
        if removed {
            debug!(variant_id, "cart remove");
            self.notify();
        }
        removed
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        debug!("cart cleared");
        self.notify();
    }

    // -- Derived values ----------------------------------------------------

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, variant_id: u64) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.variant_id == variant_id)
    }

    /// Σ price × quantity; zero for an empty cart.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    /// Sum of quantities (badge count), not the number of rows.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -- Persistence -------------------------------------------------------

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
        }
    }

    /// Replace the contents with a snapshot. Rows are re-added one by one so
    /// duplicate variant ids merge and zero quantities become 1.
    pub fn restore(&mut self, snapshot: CartSnapshot) {
        self.items.clear();
        for line in snapshot.items {
            let added = line.quantity.max(1);
            match self.items.iter_mut().find(|i| i.variant_id == line.variant_id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(added),
                None => self.items.push(CartLineItem {
                    quantity: added,
                    ..line
                }),
            }
        }
        self.notify();
    }

    // -- Subscriptions -----------------------------------------------------

    /// Register a callback run after every change. Returns an id for
    /// [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartStore) + Send + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(self);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
