//! Browse page: category selector and product table.
//!
//! The two halves load independently. A failed category fetch hides the
//! selector without an error; a failed product fetch shows one.

use cornerstore_core::{Category, CategoryId, Product, ProductId};
use serde::Serialize;

use super::{FetchState, format_price};
use crate::catalog::{CatalogClient, CatalogError};

/// Label of the option that selects every category.
pub const ALL_CATEGORIES_LABEL: &str = "All";

/// Shown when the product list is empty.
pub const NO_PRODUCTS_MESSAGE: &str = "No products available.";

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    /// `None` for "All".
    pub value: Option<CategoryId>,
    pub label: String,
}

/// Category dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySelector {
    state: FetchState<Vec<Category>>,
}

impl CategorySelector {
    /// Settle from the categories fetch.
    #[must_use]
    pub fn resolve(result: Result<Vec<Category>, CatalogError>) -> Self {
        let state = match result {
            Ok(categories) => FetchState::Loaded(categories),
            Err(e) => {
                // Hidden rather than reported
                tracing::warn!(error = %e, "Category fetch failed, hiding selector");
                FetchState::Failed(String::new())
            }
        };
        Self { state }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Whether the selector is rendered at all.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.state.loaded().is_some()
    }

    /// "All" followed by one option per category, once loaded.
    #[must_use]
    pub fn options(&self) -> Option<Vec<CategoryOption>> {
        let categories = self.state.loaded()?;
        let all = CategoryOption {
            value: None,
            label: ALL_CATEGORIES_LABEL.to_string(),
        };
        let options = std::iter::once(all)
            .chain(categories.iter().map(|c| CategoryOption {
                value: Some(c.id),
                label: c.name.clone(),
            }))
            .collect();
        Some(options)
    }
}

/// One product table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: format_price(product.price),
        }
    }
}

/// Product table for the selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductTable {
    state: FetchState<Vec<ProductRow>>,
}

impl ProductTable {
    /// Settle from the products fetch.
    #[must_use]
    pub fn resolve(result: Result<Vec<Product>, CatalogError>) -> Self {
        let result = result.map(|products| products.iter().map(ProductRow::from).collect());
        Self {
            state: FetchState::from_result(result),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Rows once loaded.
    #[must_use]
    pub fn rows(&self) -> &[ProductRow] {
        self.state.loaded().map_or(&[][..], Vec::as_slice)
    }

    /// Error or empty-list message shown instead of rows.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Loading => None,
            FetchState::Failed(message) => Some(message),
            FetchState::Loaded(rows) if rows.is_empty() => Some(NO_PRODUCTS_MESSAGE),
            FetchState::Loaded(_) => None,
        }
    }
}

/// The browse page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseProducts {
    selected: Option<CategoryId>,
    categories: CategorySelector,
    products: ProductTable,
}

impl BrowseProducts {
    /// Page in its loading state with "All" selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected category, `None` for "All".
    #[must_use]
    pub const fn selected(&self) -> Option<CategoryId> {
        self.selected
    }

    /// Change the category; the product table goes back to loading.
    pub fn select(&mut self, category_id: Option<CategoryId>) {
        if self.selected != category_id {
            self.selected = category_id;
            self.products = ProductTable::default();
        }
    }

    pub fn resolve_categories(&mut self, result: Result<Vec<Category>, CatalogError>) {
        self.categories = CategorySelector::resolve(result);
    }

    pub fn resolve_products(&mut self, result: Result<Vec<Product>, CatalogError>) {
        self.products = ProductTable::resolve(result);
    }

    #[must_use]
    pub const fn categories(&self) -> &CategorySelector {
        &self.categories
    }

    #[must_use]
    pub const fn products(&self) -> &ProductTable {
        &self.products
    }

    /// Fetch both halves concurrently for `selected`.
    #[tracing::instrument(skip(catalog))]
    pub async fn load(catalog: &CatalogClient, selected: Option<CategoryId>) -> Self {
        let (categories, products) = tokio::join!(catalog.categories(), catalog.products(selected));

        let mut page = Self::new();
        page.select(selected);
        page.resolve_categories(categories);
        page.resolve_products(products);
        page
    }
}
