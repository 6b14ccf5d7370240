//! Change notifications emitted by the cart store.

use std::num::NonZeroU32;

use cornerstore_core::ProductId;

/// A state change of a [`CartStore`](super::CartStore).
///
/// Exactly one event is emitted per operation that changes the cart;
/// operations that leave it untouched emit nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// Product entered the cart with quantity 1.
    Added { product_id: ProductId },
    /// Quantity of a product already in the cart changed.
    QuantityChanged {
        product_id: ProductId,
        quantity: NonZeroU32,
    },
    /// Product left the cart.
    Removed { product_id: ProductId },
    /// Every product left the cart at once.
    Cleared,
}

impl CartEvent {
    /// The product this event concerns, if it concerns a single product.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::Added { product_id }
            | Self::QuantityChanged { product_id, .. }
            | Self::Removed { product_id } => Some(*product_id),
            Self::Cleared => None,
        }
    }
}
