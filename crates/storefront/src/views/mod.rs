//! View models for the storefront.
//!
//! Each view model holds the state a view renders from and the actions it
//! offers; none of them render anything. They read catalog data through
//! [`CatalogClient`](crate::catalog::CatalogClient) results and mutate the
//! cart only through [`CartStore`](crate::cart::CartStore) operations.
//!
//! # Views
//!
//! - [`quantity_selector`] - Add-to-cart / +/- controls for one product
//! - [`product_form`] - Product edit form: validation and submission
//! - [`product_detail`] - Single product with invalid/not-found/error states
//! - [`browse`] - Category selector and product table
//! - [`category_list`] - Category names, reporting fetch errors
//! - [`search_box`] - Search input that reports non-blank terms
//! - [`expandable_text`] - Long text truncated behind a "Show More" toggle
//! - [`order_status`] - Order status selector
//! - [`auth_status`] - Log in/out status, greeting and user account actions

pub mod auth_status;
pub mod browse;
pub mod category_list;
pub mod expandable_text;
pub mod fetch;
pub mod order_status;
pub mod product_detail;
pub mod product_form;
pub mod quantity_selector;
pub mod search_box;

pub use auth_status::{AuthState, AuthStatus, Greeting, UserAccount};
pub use browse::{BrowseProducts, CategoryOption, CategorySelector, ProductRow, ProductTable};
pub use category_list::CategoryList;
pub use expandable_text::ExpandableText;
pub use fetch::FetchState;
pub use order_status::OrderStatusSelector;
pub use product_detail::ProductDetail;
pub use product_form::{
    Field, FieldError, FormError, Notification, ProductForm, ProductFormValues, ProductSubmitter,
};
pub use quantity_selector::{QuantityControls, QuantitySelector};
pub use search_box::SearchBox;

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a price for display (e.g., "$19.99").
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${cents:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(5, 0)), "$5.00");
        assert_eq!(format_price(Decimal::new(1999, 2)), "$19.99");
        assert_eq!(format_price(Decimal::new(25, 1)), "$2.50");
        assert_eq!(format_price(Decimal::new(12346, 3)), "$12.35");
    }
}
