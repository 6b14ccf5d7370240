//! In-process catalog service for tests.
//!
//! Serves the catalog endpoints from memory on `127.0.0.1:<random port>`.
//! Created products get the next free ID; updates replace the stored fields.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use cornerstore_core::{Category, Product, ProductDraft, ProductId};
use url::Url;

use crate::catalog::CatalogClient;
use crate::config::CatalogConfig;

type Shared = Arc<Mutex<StubData>>;

#[derive(Default)]
struct StubData {
    categories: Vec<Category>,
    products: Vec<Product>,
    failing: bool,
    token: Option<String>,
}

/// Builder for a stub catalog.
#[derive(Default)]
pub struct StubCatalog {
    data: StubData,
}

/// A stub catalog accepting requests.
pub struct RunningStub {
    url: Url,
    data: Shared,
}

impl StubCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.data.categories = categories;
        self
    }

    #[must_use]
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.data.products = products;
        self
    }

    /// Answer every request with 500.
    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.data.failing = true;
        self
    }

    /// Answer 401 unless the request carries this bearer token.
    #[must_use]
    pub fn requiring_token(mut self, token: &str) -> Self {
        self.data.token = Some(token.to_string());
        self
    }

    /// Bind to a random local port and serve in the background.
    pub async fn spawn(self) -> RunningStub {
        let data: Shared = Arc::new(Mutex::new(self.data));

        let app = Router::new()
            .route("/categories", get(list_categories))
            .route("/products", get(list_products).post(create_product))
            .route("/products/{id}", get(show_product).put(update_product))
            .with_state(Arc::clone(&data));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningStub {
            url: Url::parse(&format!("http://{addr}/")).unwrap(),
            data,
        }
    }
}

impl RunningStub {
    /// Base URL of the stub.
    #[must_use]
    pub fn url(&self) -> Url {
        self.url.clone()
    }

    /// A client without credentials pointed at the stub.
    #[must_use]
    pub fn client(&self) -> CatalogClient {
        let mut config = CatalogConfig::new(self.url());
        config.timeout_secs = 5;
        CatalogClient::new(&config).unwrap()
    }

    /// Start or stop failing every request.
    pub fn set_failing(&self, failing: bool) {
        self.data.lock().unwrap().failing = failing;
    }

    /// Products currently stored.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.data.lock().unwrap().products.clone()
    }
}

fn reject(data: &StubData, headers: &HeaderMap) -> Option<Response> {
    if data.failing {
        return Some((StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response());
    }

    if let Some(token) = &data.token {
        let expected = format!("Bearer {token}");
        let sent = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if sent != Some(expected.as_str()) {
            return Some(StatusCode::UNAUTHORIZED.into_response());
        }
    }

    None
}

async fn list_categories(State(data): State<Shared>, headers: HeaderMap) -> Response {
    let data = data.lock().unwrap();
    if let Some(rejection) = reject(&data, &headers) {
        return rejection;
    }
    Json(data.categories.clone()).into_response()
}

async fn list_products(
    State(data): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let data = data.lock().unwrap();
    if let Some(rejection) = reject(&data, &headers) {
        return rejection;
    }

    let category_id = query.get("categoryId").and_then(|v| v.parse::<i32>().ok());
    let products: Vec<Product> = data
        .products
        .iter()
        .filter(|p| category_id.is_none_or(|id| p.category_id.as_i32() == id))
        .cloned()
        .collect();
    Json(products).into_response()
}

async fn show_product(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    let data = data.lock().unwrap();
    if let Some(rejection) = reject(&data, &headers) {
        return rejection;
    }

    // Unknown products are answered with `null`, like the real catalog
    let product = data.products.iter().find(|p| p.id.as_i32() == id).cloned();
    Json(product).into_response()
}

async fn create_product(
    State(data): State<Shared>,
    headers: HeaderMap,
    Json(draft): Json<ProductDraft>,
) -> Response {
    let mut data = data.lock().unwrap();
    if let Some(rejection) = reject(&data, &headers) {
        return rejection;
    }

    let next_id = data.products.iter().map(|p| p.id.as_i32()).max().unwrap_or(0) + 1;
    let product = Product {
        id: ProductId::new(next_id),
        name: draft.name,
        price: draft.price,
        category_id: draft.category_id,
    };
    data.products.push(product.clone());
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn update_product(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(draft): Json<ProductDraft>,
) -> Response {
    let mut data = data.lock().unwrap();
    if let Some(rejection) = reject(&data, &headers) {
        return rejection;
    }

    let Some(product) = data.products.iter_mut().find(|p| p.id.as_i32() == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    product.name = draft.name;
    product.price = draft.price;
    product.category_id = draft.category_id;
    Json(product.clone()).into_response()
}
