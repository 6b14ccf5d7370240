//! Catalog service client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`
//! - The catalog is the source of truth; responses are not cached here
//! - An optional bearer token is attached to every request
//!
//! # Endpoints
//!
//! ```text
//! GET  /categories             - [{id, name}]
//! GET  /products[?categoryId=] - [{id, name, price, categoryId}]
//! GET  /products/:id           - product, or null / 404 when unknown
//! POST /products               - create from {name, price, categoryId}
//! PUT  /products/:id           - update from {name, price, categoryId}
//! ```

use std::sync::Arc;
use std::time::Duration;

use cornerstore_core::{Category, CategoryId, Product, ProductDraft, ProductId};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;
use crate::views::ProductSubmitter;

/// Longest slice of a response body kept for logs and errors.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("Catalog returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A catalog URL could not be built.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

impl CatalogError {
    /// Whether this error means the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Client for the catalog service.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<SecretString>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        // Paths are joined relative to the base, which needs a trailing slash
        let mut base_url = config.api_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url,
                access_token: config.access_token.clone(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and decode its JSON body.
    ///
    /// A 404 becomes `CatalogError::NotFound(resource)`. An empty body decodes
    /// as JSON `null`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<T, CatalogError> {
        let request = match &self.inner.access_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(resource.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            let snippet = excerpt(&body);
            tracing::error!(
                status = %status,
                body = %snippet,
                resource,
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: snippet,
            });
        }

        let body = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(body),
                resource,
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint("categories")?;
        let categories: Vec<Category> = self
            .execute(self.inner.client.get(url), "categories")
            .await?;
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List products, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn products(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Product>, CatalogError> {
        let mut url = self.endpoint("products")?;
        if let Some(category_id) = category_id {
            url.query_pairs_mut()
                .append_pair("categoryId", &category_id.to_string());
        }

        let products: Vec<Product> = self.execute(self.inner.client.get(url), "products").await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog answers 404 or `null`,
    /// or another error if the request fails.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let resource = format!("product {id}");
        let url = self.endpoint(&format!("products/{id}"))?;

        let product: Option<Product> = self.execute(self.inner.client.get(url), &resource).await?;
        product.ok_or(CatalogError::NotFound(resource))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog rejects the product or the request fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, CatalogError> {
        let url = self.endpoint("products")?;
        let product: Product = self
            .execute(self.inner.client.post(url).json(draft), "products")
            .await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace the editable fields of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown products, or another error
    /// if the catalog rejects the update or the request fails.
    #[instrument(skip(self, draft))]
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, CatalogError> {
        let resource = format!("product {id}");
        let url = self.endpoint(&format!("products/{id}"))?;
        let product: Product = self
            .execute(self.inner.client.put(url).json(draft), &resource)
            .await?;
        tracing::info!(product_id = %product.id, "Product updated");
        Ok(product)
    }
}

impl ProductSubmitter for CatalogClient {
    async fn submit_product(
        &self,
        id: Option<ProductId>,
        draft: &ProductDraft,
    ) -> Result<Product, CatalogError> {
        match id {
            Some(id) => self.update_product(id, draft).await,
            None => self.create_product(draft).await,
        }
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::testkit::catalog::StubCatalog;
    use crate::testkit::domain::{category, product};

    #[tokio::test]
    async fn test_categories() {
        let stub = StubCatalog::new()
            .with_categories(vec![category(1, "Dairy"), category(2, "Bakery")])
            .spawn()
            .await;

        let categories = stub.client().categories().await.unwrap();
        assert_eq!(categories, vec![category(1, "Dairy"), category(2, "Bakery")]);
    }

    #[tokio::test]
    async fn test_products_filtered_by_category() {
        let stub = StubCatalog::new()
            .with_products(vec![
                product(1, "Milk", 5, 1),
                product(2, "Bread", 3, 2),
                product(3, "Cheese", 9, 1),
            ])
            .spawn()
            .await;
        let client = stub.client();

        let all = client.products(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let dairy = client.products(Some(CategoryId::new(1))).await.unwrap();
        let names: Vec<_> = dairy.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Milk", "Cheese"]);
    }

    #[tokio::test]
    async fn test_product_found() {
        let stub = StubCatalog::new()
            .with_products(vec![product(4, "Tea", 12, 1)])
            .spawn()
            .await;

        let found = stub.client().product(ProductId::new(4)).await.unwrap();
        assert_eq!(found.name, "Tea");
        assert_eq!(found.price, Decimal::new(12, 0));
    }

    #[tokio::test]
    async fn test_product_null_is_not_found() {
        let stub = StubCatalog::new().spawn().await;

        let err = stub.client().product(ProductId::new(1)).await.unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let stub = StubCatalog::new().failing().spawn().await;

        let err = stub.client().products(None).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let stub = StubCatalog::new().spawn().await;
        let mut config = CatalogConfig::new(stub.url().join("missing/").unwrap());
        config.timeout_secs = 5;
        let client = CatalogClient::new(&config).unwrap();

        let err = client.categories().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_submit_creates_then_updates() {
        let stub = StubCatalog::new().spawn().await;
        let client = stub.client();
        let draft = ProductDraft {
            name: "Jam".to_string(),
            price: Decimal::new(4, 0),
            category_id: CategoryId::new(3),
        };

        let created = client.submit_product(None, &draft).await.unwrap();
        assert!(created.id.is_valid());
        assert_eq!(created.name, "Jam");

        let renamed = ProductDraft {
            name: "Apricot Jam".to_string(),
            ..draft
        };
        let updated = client.submit_product(Some(created.id), &renamed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Apricot Jam");

        let fetched = client.product(created.id).await.unwrap();
        assert_eq!(fetched.name, "Apricot Jam");
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let stub = StubCatalog::new()
            .requiring_token("cat_9fQ2xL7pZ3vR8mW1")
            .with_categories(vec![category(1, "Dairy")])
            .spawn()
            .await;

        let anonymous = stub.client().categories().await.unwrap_err();
        assert!(matches!(
            anonymous,
            CatalogError::Status {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        ));

        let mut config = CatalogConfig::new(stub.url());
        config.access_token = Some(SecretString::from("cat_9fQ2xL7pZ3vR8mW1".to_string()));
        let client = CatalogClient::new(&config).unwrap();
        assert_eq!(client.categories().await.unwrap().len(), 1);
    }

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let config = CatalogConfig::new(Url::parse("http://localhost:4000/api").unwrap());
        let client = CatalogClient::new(&config).unwrap();

        assert_eq!(
            client.endpoint("products").unwrap().as_str(),
            "http://localhost:4000/api/products"
        );
    }
}
