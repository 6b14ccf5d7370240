//! Session-scoped shopping cart.
//!
//! The [`CartStore`] tracks how many units of each product a shopper has
//! selected. It is created empty once per session and owned by it; views hold
//! only product IDs and go through the store for every change.
//!
//! # Example
//!
//! ```rust
//! use cornerstore_core::ProductId;
//! use cornerstore_storefront::cart::CartStore;
//!
//! let mut cart = CartStore::new();
//! let milk = ProductId::new(5);
//!
//! cart.add(milk)?;
//! cart.increment(milk)?;
//! assert_eq!(cart.quantity(milk).map(|q| q.get()), Some(2));
//!
//! cart.decrement(milk);
//! cart.decrement(milk);
//! assert!(cart.quantity(milk).is_none());
//! # Ok::<(), cornerstore_storefront::cart::CartError>(())
//! ```

mod events;

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use cornerstore_core::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

pub use events::CartEvent;

/// Buffered events per subscriber before it starts lagging.
const EVENT_CAPACITY: usize = 64;

/// One product's entry in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: NonZeroU32,
}

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Product IDs start at 1.
    #[error("Invalid product id: {0}")]
    InvalidProductId(ProductId),

    /// A restored snapshot listed the same product twice.
    #[error("Duplicate cart entry for product {0}")]
    DuplicateProduct(ProductId),
}

/// In-memory cart keyed by product.
///
/// Every item has a quantity of at least 1; a product whose quantity would
/// drop to 0 is removed instead. Subscribers registered with
/// [`subscribe`](Self::subscribe) receive a [`CartEvent`] for each change.
#[derive(Debug)]
pub struct CartStore {
    items: BTreeMap<ProductId, NonZeroU32>,
    events: broadcast::Sender<CartEvent>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            items: BTreeMap::new(),
            events,
        }
    }

    /// Rebuild a cart from a persisted snapshot.
    ///
    /// No events are emitted while restoring.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidProductId` for IDs below 1 and
    /// `CartError::DuplicateProduct` if a product appears twice.
    pub fn restore(items: impl IntoIterator<Item = CartItem>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for item in items {
            ensure_valid(item.product_id)?;
            if cart.items.insert(item.product_id, item.quantity).is_some() {
                return Err(CartError::DuplicateProduct(item.product_id));
            }
        }
        Ok(cart)
    }

    /// Receive a [`CartEvent`] for every subsequent change.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Put a product in the cart with quantity 1.
    ///
    /// Adding a product that is already present leaves its quantity alone;
    /// use [`increment`](Self::increment) to bump it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidProductId` if `product_id` is below 1.
    pub fn add(&mut self, product_id: ProductId) -> Result<(), CartError> {
        ensure_valid(product_id)?;
        if !self.items.contains_key(&product_id) {
            self.items.insert(product_id, NonZeroU32::MIN);
            self.emit(CartEvent::Added { product_id });
        }
        Ok(())
    }

    /// Raise a product's quantity by one, adding it if absent.
    ///
    /// Returns the new quantity. Quantities saturate at `u32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidProductId` if `product_id` is below 1.
    pub fn increment(&mut self, product_id: ProductId) -> Result<NonZeroU32, CartError> {
        ensure_valid(product_id)?;
        let Some(&current) = self.items.get(&product_id) else {
            self.items.insert(product_id, NonZeroU32::MIN);
            self.emit(CartEvent::Added { product_id });
            return Ok(NonZeroU32::MIN);
        };

        let quantity = current.saturating_add(1);
        if quantity != current {
            self.items.insert(product_id, quantity);
            self.emit(CartEvent::QuantityChanged {
                product_id,
                quantity,
            });
        }
        Ok(quantity)
    }

    /// Lower a product's quantity by one, removing it when it reaches 0.
    ///
    /// Returns the remaining quantity, or `None` once the product is absent.
    /// Absent products are left alone.
    pub fn decrement(&mut self, product_id: ProductId) -> Option<NonZeroU32> {
        let current = *self.items.get(&product_id)?;

        if let Some(quantity) = NonZeroU32::new(current.get() - 1) {
            self.items.insert(product_id, quantity);
            self.emit(CartEvent::QuantityChanged {
                product_id,
                quantity,
            });
            Some(quantity)
        } else {
            self.items.remove(&product_id);
            self.emit(CartEvent::Removed { product_id });
            None
        }
    }

    /// Take a product out of the cart regardless of its quantity.
    ///
    /// Returns whether the product was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let removed = self.items.remove(&product_id).is_some();
        if removed {
            self.emit(CartEvent::Removed { product_id });
        }
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.emit(CartEvent::Cleared);
        }
    }

    /// Quantity of a product, or `None` if it is not in the cart.
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> Option<NonZeroU32> {
        self.items.get(&product_id).copied()
    }

    /// Whether a product is in the cart.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.contains_key(&product_id)
    }

    /// Snapshot of the cart contents in product ID order.
    ///
    /// Each call starts a fresh read; the yielded items are copies.
    pub fn items(&self) -> impl Iterator<Item = CartItem> + '_ {
        self.items.iter().map(|(&product_id, &quantity)| CartItem {
            product_id,
            quantity,
        })
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.values().map(|q| u64::from(q.get())).sum()
    }

    fn emit(&self, event: CartEvent) {
        tracing::trace!(?event, "cart changed");
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

const fn ensure_valid(product_id: ProductId) -> Result<(), CartError> {
    if product_id.is_valid() {
        Ok(())
    } else {
        Err(CartError::InvalidProductId(product_id))
    }
}
