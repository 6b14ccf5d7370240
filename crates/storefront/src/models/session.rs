//! Session-stored cart.
//!
//! The cart lives in the shopper's session as a list of `{productId, quantity}`
//! items and is rebuilt into a [`CartStore`] for every request.

use tower_sessions::Session;

use crate::cart::{CartItem, CartStore};

/// Session keys for storefront data.
pub mod keys {
    /// Key for the shopper's cart items.
    pub const CART: &str = "cart";
}

/// Loads and saves the cart of one session.
#[derive(Debug, Clone)]
pub struct SessionCart {
    session: Session,
}

impl SessionCart {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Rebuild the session's cart.
    ///
    /// A stored cart that fails to restore is discarded and an empty cart is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(&self) -> Result<CartStore, tower_sessions::session::Error> {
        let Some(value) = self.session.get_value(keys::CART).await? else {
            return Ok(CartStore::new());
        };

        let restored = serde_json::from_value::<Vec<CartItem>>(value)
            .map_err(|e| e.to_string())
            .and_then(|items| CartStore::restore(items).map_err(|e| e.to_string()));

        Ok(restored.unwrap_or_else(|error| {
            tracing::warn!(%error, "Discarding corrupt session cart");
            CartStore::new()
        }))
    }

    /// Write the cart back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self, cart: &CartStore) -> Result<(), tower_sessions::session::Error> {
        let items: Vec<CartItem> = cart.items().collect();
        self.session.insert(keys::CART, items).await
    }

    /// Drop the cart from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn forget(&self) -> Result<(), tower_sessions::session::Error> {
        self.session.remove::<Vec<CartItem>>(keys::CART).await?;
        Ok(())
    }
}
