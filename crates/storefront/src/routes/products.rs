//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use cornerstore_core::{CategoryId, Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::views::{BrowseProducts, CategoryList, ProductDetail, ProductForm, ProductFormValues};

/// Browse query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseQuery {
    pub category_id: Option<CategoryId>,
}

/// Browse page: category selector and product table.
///
/// Fetch failures are part of the page, so this always answers 200.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Json<BrowseProducts> {
    Json(BrowseProducts::load(state.catalog(), query.category_id).await)
}

/// Category list; a failed fetch is reported in the body.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<CategoryList> {
    Json(CategoryList::load(state.catalog()).await)
}

/// Product detail, with the HTTP status following the view state.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> (StatusCode, Json<ProductDetail>) {
    let detail = ProductDetail::load(state.catalog(), ProductId::new(id)).await;

    let status = match &detail {
        ProductDetail::Loaded { .. } | ProductDetail::Loading => StatusCode::OK,
        ProductDetail::Invalid => StatusCode::BAD_REQUEST,
        ProductDetail::NotFound => StatusCode::NOT_FOUND,
        ProductDetail::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(detail))
}

/// Create a product from the submitted form.
#[instrument(skip(state, values), fields(name = %values.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(values): Json<ProductFormValues>,
) -> Result<(StatusCode, Json<Product>)> {
    let mut form = ProductForm::with_values(None, values);
    let product = form.submit(state.catalog()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product from the submitted form.
#[instrument(skip(state, values))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(values): Json<ProductFormValues>,
) -> Result<Json<Product>> {
    let product_id = ProductId::new(id);
    if !product_id.is_valid() {
        return Err(AppError::BadRequest(format!("Invalid productId: {id}")));
    }

    let mut form = ProductForm::with_values(Some(product_id), values);
    let product = form.submit(state.catalog()).await?;
    Ok(Json(product))
}
