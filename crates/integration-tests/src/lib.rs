//! Integration tests for Cornerstore.
//!
//! Each test starts a real storefront server on `127.0.0.1:<random port>`
//! against an in-process stub catalog and drives it over HTTP with a
//! cookie-keeping client, the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cornerstore-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use cornerstore_storefront::routes;
use cornerstore_storefront::state::AppState;
use cornerstore_storefront::testkit::catalog::{RunningStub, StubCatalog};
use cornerstore_storefront::testkit::config::storefront_config;
use cornerstore_storefront::testkit::domain::{category, product};
use reqwest::Client;

/// A running storefront and the catalog behind it.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
    pub catalog: RunningStub,
}

impl TestContext {
    /// Storefront over a catalog with two categories and three products.
    pub async fn new() -> Self {
        let catalog = StubCatalog::new()
            .with_categories(vec![category(1, "Dairy"), category(2, "Bakery")])
            .with_products(vec![
                product(1, "Milk", 5, 1),
                product(2, "Bread", 3, 2),
                product(3, "Cheese", 12, 1),
            ]);
        Self::with_catalog(catalog).await
    }

    /// Storefront over the given catalog.
    pub async fn with_catalog(catalog: StubCatalog) -> Self {
        let catalog = catalog.spawn().await;
        let state = AppState::new(storefront_config(catalog.url())).unwrap();
        let app = routes::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: shopper(),
            storefront_url: format!("http://{addr}"),
            catalog,
        }
    }

    /// Absolute URL of a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }
}

/// A fresh client with its own cookie jar, i.e. its own session.
#[must_use]
pub fn shopper() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
