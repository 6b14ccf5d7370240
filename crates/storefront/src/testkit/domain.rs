//! Builders for catalog entities used across tests.

use cornerstore_core::{Category, CategoryId, Product, ProductId};
use rust_decimal::Decimal;

/// Create a [`Category`].
#[must_use]
pub fn category(id: i32, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
    }
}

/// Create a [`Product`] with a whole-unit price.
#[must_use]
pub fn product(id: i32, name: &str, price: i64, category_id: i32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Decimal::new(price, 0),
        category_id: CategoryId::new(category_id),
    }
}
