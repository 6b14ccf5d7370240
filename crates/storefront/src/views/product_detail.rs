//! Single product view.

use cornerstore_core::{Product, ProductId};
use serde::Serialize;

use crate::catalog::{CatalogClient, CatalogError};

/// Shown when the requested ID is below 1.
pub const INVALID_PRODUCT_MESSAGE: &str = "Invalid productId";

/// Shown when the catalog does not know the product.
pub const NOT_FOUND_MESSAGE: &str = "The given product was not found.";

/// State of the product detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ProductDetail {
    Invalid,
    Loading,
    NotFound,
    Failed { message: String },
    Loaded { product: Product },
}

impl ProductDetail {
    /// Initial state for `id`: `Invalid` for IDs below 1, `Loading` otherwise.
    #[must_use]
    pub const fn for_product(id: ProductId) -> Self {
        if id.is_valid() { Self::Loading } else { Self::Invalid }
    }

    /// Settle the view from a catalog lookup.
    #[must_use]
    pub fn resolve(result: Result<Product, CatalogError>) -> Self {
        match result {
            Ok(product) => Self::Loaded { product },
            Err(e) if e.is_not_found() => Self::NotFound,
            Err(e) => {
                tracing::warn!(error = %e, "Product lookup failed");
                Self::Failed {
                    message: format!("Error: {e}"),
                }
            }
        }
    }

    /// Look the product up, skipping the catalog for invalid IDs.
    pub async fn load(catalog: &CatalogClient, id: ProductId) -> Self {
        match Self::for_product(id) {
            Self::Loading => Self::resolve(catalog.product(id).await),
            state => state,
        }
    }

    /// The message rendered in place of the product, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid => Some(INVALID_PRODUCT_MESSAGE),
            Self::NotFound => Some(NOT_FOUND_MESSAGE),
            Self::Failed { message } => Some(message),
            Self::Loading | Self::Loaded { .. } => None,
        }
    }

    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        match self {
            Self::Loaded { product } => Some(product),
            _ => None,
        }
    }
}
