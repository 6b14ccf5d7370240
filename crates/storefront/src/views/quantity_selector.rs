//! Add-to-cart and quantity controls for a single product.

use std::num::NonZeroU32;

use cornerstore_core::ProductId;
use serde::Serialize;

use crate::cart::{CartError, CartStore};

/// Controls shown for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuantityControls {
    /// Product not in the cart: a single "Add to Cart" button.
    AddToCart,
    /// Product in the cart: "-", the quantity, "+".
    Adjust { quantity: NonZeroU32 },
}

/// Quantity selector bound to one product.
///
/// Holds only the product ID; the quantity always comes from the cart.
#[derive(Debug, Clone, Copy)]
pub struct QuantitySelector {
    product_id: ProductId,
}

impl QuantitySelector {
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Controls for the current cart state.
    #[must_use]
    pub fn controls(&self, cart: &CartStore) -> QuantityControls {
        cart.quantity(self.product_id)
            .map_or(QuantityControls::AddToCart, |quantity| {
                QuantityControls::Adjust { quantity }
            })
    }

    /// "Add to Cart" pressed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidProductId` for IDs below 1.
    pub fn add_to_cart(&self, cart: &mut CartStore) -> Result<QuantityControls, CartError> {
        cart.add(self.product_id)?;
        Ok(self.controls(cart))
    }

    /// "+" pressed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidProductId` for IDs below 1.
    pub fn increment(&self, cart: &mut CartStore) -> Result<QuantityControls, CartError> {
        cart.increment(self.product_id)?;
        Ok(self.controls(cart))
    }

    /// "-" pressed. Going below 1 takes the product out of the cart.
    pub fn decrement(&self, cart: &mut CartStore) -> QuantityControls {
        cart.decrement(self.product_id);
        self.controls(cart)
    }
}
