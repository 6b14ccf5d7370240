//! Standalone category list.
//!
//! Unlike the browse page's selector, a failed fetch is reported to the
//! shopper instead of hiding the list.

use cornerstore_core::Category;
use serde::Serialize;

use super::FetchState;
use crate::catalog::{CatalogClient, CatalogError};

/// Shown while the categories are in flight.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Category names under a heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryList {
    state: FetchState<Vec<Category>>,
}

impl CategoryList {
    /// Settle from the categories fetch.
    #[must_use]
    pub fn resolve(result: Result<Vec<Category>, CatalogError>) -> Self {
        Self {
            state: FetchState::from_result(result),
        }
    }

    #[tracing::instrument(skip(catalog))]
    pub async fn load(catalog: &CatalogClient) -> Self {
        Self::resolve(catalog.categories().await)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Category names in catalog order, empty until loaded.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.state
            .loaded()
            .map(|categories| categories.iter().map(|c| c.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Loading or error text shown in place of the list.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Loading => Some(LOADING_MESSAGE),
            FetchState::Failed(message) => Some(message),
            FetchState::Loaded(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testkit::catalog::StubCatalog;
    use crate::testkit::domain::category;

    #[test]
    fn test_loading_message() {
        let list = CategoryList::default();
        assert!(list.is_loading());
        assert!(list.names().is_empty());
        assert!(list.message().unwrap().to_lowercase().contains("loading"));
    }

    #[test]
    fn test_failure_is_reported() {
        let list = CategoryList::resolve(Err(CatalogError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        }));

        assert!(!list.is_loading());
        assert!(list.names().is_empty());
        assert!(list.message().unwrap().starts_with("Error"));
    }

    #[tokio::test]
    async fn test_load_lists_names() {
        let stub = StubCatalog::new()
            .with_categories(vec![category(1, "Dairy"), category(2, "Bakery")])
            .spawn()
            .await;

        let list = CategoryList::load(&stub.client()).await;

        assert_eq!(list.names(), ["Dairy", "Bakery"]);
        assert!(list.message().is_none());
    }

    #[tokio::test]
    async fn test_load_with_failing_catalog() {
        let stub = StubCatalog::new().failing().spawn().await;

        let list = CategoryList::load(&stub.client()).await;

        assert!(list.message().unwrap().starts_with("Error"));
    }
}
