//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (catalog reachable)
//!
//! # Products
//! GET    /categories             - Category list
//! GET    /products[?categoryId=] - Browse page (category selector + table)
//! GET    /products/{id}          - Product detail
//! POST   /products               - Create product from form values
//! PUT    /products/{id}          - Update product from form values
//!
//! # Cart (session scoped)
//! GET    /cart                   - Cart with items, subtotal, item count
//! DELETE /cart                   - Clear cart (checkout)
//! GET    /cart/{id}              - Quantity-selector controls
//! POST   /cart/{id}/add          - Add to cart
//! POST   /cart/{id}/increment    - Increase quantity
//! POST   /cart/{id}/decrement    - Decrease quantity (removes at 0)
//! DELETE /cart/{id}              - Remove from cart
//!
//! # Auth
//! POST   /auth/logout            - End session
//! ```

pub mod auth;
pub mod cart;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", get(products::show).put(products::update))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/{id}", get(cart::item).delete(cart::remove))
        .route("/{id}/add", post(cart::add))
        .route("/{id}/increment", post(cart::increment))
        .route("/{id}/decrement", post(cart::decrement))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(products::categories))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
}

/// The full application: routes, sessions and request tracing.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .fallback(not_found)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the catalog service is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().categories().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Catalog not ready: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::testkit::catalog::{RunningStub, StubCatalog};
    use crate::testkit::config::storefront_config;
    use crate::testkit::domain::{category, product};

    struct Reply {
        status: StatusCode,
        cookie: Option<String>,
        body: Value,
    }

    async fn stub() -> RunningStub {
        StubCatalog::new()
            .with_categories(vec![category(1, "Dairy"), category(2, "Bakery")])
            .with_products(vec![product(1, "Milk", 5, 1), product(2, "Bread", 3, 2)])
            .spawn()
            .await
    }

    fn app_for(stub: &RunningStub) -> Router {
        app(AppState::new(storefront_config(stub.url())).unwrap())
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Reply {
            status,
            cookie,
            body,
        }
    }

    #[tokio::test]
    async fn test_health() {
        let stub = stub().await;
        let app = app_for(&stub);

        let reply = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);

        let reply = send(&app, Method::GET, "/health/ready", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);

        stub.set_failing(true);
        let reply = send(&app, Method::GET, "/health/ready", None, None).await;
        assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let stub = stub().await;
        let reply = send(&app_for(&stub), Method::GET, "/nowhere", None, None).await;

        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body["error"], "Not found: /nowhere");
    }

    #[tokio::test]
    async fn test_cart_session_flow() {
        let stub = stub().await;
        let app = app_for(&stub);

        let reply = send(&app, Method::POST, "/cart/1/add", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["controls"], json!({"kind": "adjust", "quantity": 1}));
        let cookie = reply.cookie.unwrap();

        let reply = send(&app, Method::POST, "/cart/1/increment", Some(&cookie), None).await;
        assert_eq!(reply.body["controls"]["quantity"], 2);

        let reply = send(&app, Method::POST, "/cart/2/add", Some(&cookie), None).await;
        assert_eq!(reply.body["itemCount"], 3);

        let reply = send(&app, Method::GET, "/cart", Some(&cookie), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["subtotal"], "$13.00");
        assert_eq!(reply.body["items"].as_array().unwrap().len(), 2);

        let reply = send(&app, Method::DELETE, "/cart/1", Some(&cookie), None).await;
        assert_eq!(reply.body["controls"], json!({"kind": "addToCart"}));
        assert_eq!(reply.body["itemCount"], 1);

        let reply = send(&app, Method::DELETE, "/cart", Some(&cookie), None).await;
        assert_eq!(reply.body["itemCount"], 0);
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes() {
        let stub = stub().await;
        let app = app_for(&stub);

        let cookie = send(&app, Method::POST, "/cart/2/add", None, None)
            .await
            .cookie
            .unwrap();
        let reply = send(&app, Method::POST, "/cart/2/decrement", Some(&cookie), None).await;

        assert_eq!(reply.body["controls"], json!({"kind": "addToCart"}));
        let reply = send(&app, Method::GET, "/cart/2", Some(&cookie), None).await;
        assert_eq!(reply.body["controls"], json!({"kind": "addToCart"}));
    }

    #[tokio::test]
    async fn test_add_invalid_product_is_bad_request() {
        let stub = stub().await;
        let reply = send(&app_for(&stub), Method::POST, "/cart/0/add", None, None).await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.cookie.is_none());
    }

    #[tokio::test]
    async fn test_browse_and_detail() {
        let stub = stub().await;
        let app = app_for(&stub);

        let reply = send(&app, Method::GET, "/products?categoryId=2", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["selected"], 2);

        let reply = send(&app, Method::GET, "/products/1", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["state"], "loaded");
        assert_eq!(reply.body["product"]["name"], "Milk");

        let reply = send(&app, Method::GET, "/products/0", None, None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);

        let reply = send(&app, Method::GET, "/products/99", None, None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body["state"], "notFound");
    }

    #[tokio::test]
    async fn test_category_list() {
        let stub = stub().await;
        let app = app_for(&stub);

        let reply = send(&app, Method::GET, "/categories", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["state"], "loaded");
        assert_eq!(reply.body["data"][1]["name"], "Bakery");

        stub.set_failing(true);
        let reply = send(&app, Method::GET, "/categories", None, None).await;
        assert_eq!(reply.body["state"], "failed");
        assert!(reply.body["data"].as_str().unwrap().starts_with("Error"));
    }

    #[tokio::test]
    async fn test_product_form_submission() {
        let stub = stub().await;
        let app = app_for(&stub);

        let reply = send(
            &app,
            Method::POST,
            "/products",
            None,
            Some(json!({"name": "", "price": "0"})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(reply.body["fields"].as_array().unwrap().len(), 3);

        let reply = send(
            &app,
            Method::POST,
            "/products",
            None,
            Some(json!({"name": "Butter", "price": "4.50", "categoryId": 1})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(reply.body["id"], 3);

        let reply = send(
            &app,
            Method::PUT,
            "/products/3",
            None,
            Some(json!({"name": "Salted Butter", "price": 5, "categoryId": 1})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(stub.products()[2].name, "Salted Butter");
    }

    #[tokio::test]
    async fn test_product_submission_failure() {
        let stub = stub().await;
        let app = app_for(&stub);
        stub.set_failing(true);

        let reply = send(
            &app,
            Method::POST,
            "/products",
            None,
            Some(json!({"name": "Butter", "price": "4.50", "categoryId": 1})),
        )
        .await;

        assert_eq!(reply.status, StatusCode::BAD_GATEWAY);
        assert_eq!(reply.body["error"], "An unexpected error occurred");
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found() {
        let stub = stub().await;
        let reply = send(
            &app_for(&stub),
            Method::PUT,
            "/products/99",
            None,
            Some(json!({"name": "Ghost", "price": 1, "categoryId": 1})),
        )
        .await;

        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body["error"], "The given product was not found.");
        assert_eq!(stub.products().len(), 2);
    }

    #[tokio::test]
    async fn test_logout_clears_cart() {
        let stub = stub().await;
        let app = app_for(&stub);

        let cookie = send(&app, Method::POST, "/cart/1/add", None, None)
            .await
            .cookie
            .unwrap();
        let reply = send(&app, Method::POST, "/auth/logout", Some(&cookie), None).await;
        assert_eq!(reply.status, StatusCode::NO_CONTENT);

        let reply = send(&app, Method::GET, "/cart", Some(&cookie), None).await;
        assert_eq!(reply.body["itemCount"], 0);
    }
}
