//! Cart route handlers.
//!
//! Each request rebuilds the session's cart, applies one operation and
//! writes the cart back only if the operation changed it. Responses are JSON.

use std::collections::HashMap;
use std::num::NonZeroU32;

use axum::{
    Json,
    extract::{Path, State},
};
use cornerstore_core::{Product, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::broadcast::Receiver;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{CartError, CartEvent, CartStore};
use crate::error::{Result, add_breadcrumb};
use crate::models::SessionCart;
use crate::state::AppState;
use crate::views::{QuantityControls, QuantitySelector, format_price};

/// One cart line, priced when the catalog is reachable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: ProductId,
    pub quantity: NonZeroU32,
    pub name: Option<String>,
    pub price: Option<String>,
    pub line_price: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Absent when any line could not be priced or the sum overflows.
    pub subtotal: Option<String>,
    pub item_count: u64,
}

impl CartView {
    /// Build the view, pricing lines from `products` when available.
    #[must_use]
    pub fn new(cart: &CartStore, products: Option<&[Product]>) -> Self {
        let catalog: HashMap<ProductId, &Product> = products
            .unwrap_or_default()
            .iter()
            .map(|p| (p.id, p))
            .collect();

        let mut subtotal = Some(Decimal::ZERO);
        let items = cart
            .items()
            .map(|item| {
                let product = catalog.get(&item.product_id);
                let line_total = product.and_then(|p| {
                    let total = p.price.checked_mul(Decimal::from(item.quantity.get()));
                    if total.is_none() {
                        tracing::warn!(product_id = %p.id, "Line price overflowed");
                    }
                    total
                });
                subtotal = subtotal
                    .zip(line_total)
                    .and_then(|(sum, line)| sum.checked_add(line));

                CartItemView {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    name: product.map(|p| p.name.clone()),
                    price: product.map(|p| format_price(p.price)),
                    line_price: line_total.map(format_price),
                }
            })
            .collect();

        Self {
            items,
            subtotal: subtotal.map(format_price),
            item_count: cart.total_quantity(),
        }
    }
}

/// Controls for one product after a cart request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub product_id: ProductId,
    pub controls: QuantityControls,
    pub item_count: u64,
}

impl CartItemResponse {
    fn new(product_id: ProductId, controls: QuantityControls, cart: &CartStore) -> Self {
        Self {
            product_id,
            controls,
            item_count: cart.total_quantity(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session cart, apply `op`, and save if anything changed.
async fn mutate<T>(
    session: &Session,
    op: impl FnOnce(&mut CartStore) -> std::result::Result<T, CartError>,
) -> Result<(CartStore, T)> {
    let stored = SessionCart::new(session.clone());
    let mut cart = stored.load().await?;
    let mut events = cart.subscribe();

    let outcome = op(&mut cart)?;

    if record_events(&mut events) > 0 {
        stored.save(&cart).await?;
    }
    Ok((cart, outcome))
}

/// Log and breadcrumb every pending event, returning how many there were.
fn record_events(events: &mut Receiver<CartEvent>) -> usize {
    let mut count = 0;
    while let Ok(event) = events.try_recv() {
        count += 1;
        let product_id = event.product_id().map(|id| id.to_string());
        tracing::info!(?event, "Cart changed");

        let message = match event {
            CartEvent::Added { .. } => "Item added",
            CartEvent::QuantityChanged { .. } => "Quantity changed",
            CartEvent::Removed { .. } => "Item removed",
            CartEvent::Cleared => "Cart cleared",
        };
        match &product_id {
            Some(id) => add_breadcrumb("cart", message, Some(&[("product_id", id.as_str())])),
            None => add_breadcrumb("cart", message, None),
        }
    }
    count
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
///
/// Catalog failures leave lines unpriced rather than failing the request.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = SessionCart::new(session).load().await?;
    if cart.is_empty() {
        return Ok(Json(CartView::new(&cart, None)));
    }

    let products = match state.catalog().products(None).await {
        Ok(products) => Some(products),
        Err(e) => {
            tracing::warn!("Failed to price cart: {e}");
            None
        }
    };

    Ok(Json(CartView::new(&cart, products.as_deref())))
}

/// Quantity-selector controls for one product.
#[instrument(skip(session))]
pub async fn item(session: Session, Path(id): Path<i32>) -> Result<Json<CartItemResponse>> {
    let product_id = ProductId::new(id);
    let cart = SessionCart::new(session).load().await?;
    let controls = QuantitySelector::new(product_id).controls(&cart);
    Ok(Json(CartItemResponse::new(product_id, controls, &cart)))
}

/// "Add to Cart".
#[instrument(skip(session))]
pub async fn add(session: Session, Path(id): Path<i32>) -> Result<Json<CartItemResponse>> {
    let selector = QuantitySelector::new(ProductId::new(id));
    let (cart, controls) = mutate(&session, |cart| selector.add_to_cart(cart)).await?;
    Ok(Json(CartItemResponse::new(selector.product_id(), controls, &cart)))
}

/// "+".
#[instrument(skip(session))]
pub async fn increment(session: Session, Path(id): Path<i32>) -> Result<Json<CartItemResponse>> {
    let selector = QuantitySelector::new(ProductId::new(id));
    let (cart, controls) = mutate(&session, |cart| selector.increment(cart)).await?;
    Ok(Json(CartItemResponse::new(selector.product_id(), controls, &cart)))
}

/// "-".
#[instrument(skip(session))]
pub async fn decrement(session: Session, Path(id): Path<i32>) -> Result<Json<CartItemResponse>> {
    let selector = QuantitySelector::new(ProductId::new(id));
    let (cart, controls) = mutate(&session, |cart| Ok(selector.decrement(cart))).await?;
    Ok(Json(CartItemResponse::new(selector.product_id(), controls, &cart)))
}

/// Remove a product regardless of quantity.
#[instrument(skip(session))]
pub async fn remove(session: Session, Path(id): Path<i32>) -> Result<Json<CartItemResponse>> {
    let product_id = ProductId::new(id);
    let (cart, _) = mutate(&session, |cart| Ok(cart.remove(product_id))).await?;
    Ok(Json(CartItemResponse::new(
        product_id,
        QuantityControls::AddToCart,
        &cart,
    )))
}

/// Empty the cart (checkout).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let (cart, ()) = mutate(&session, |cart| {
        cart.clear();
        Ok(())
    })
    .await?;
    Ok(Json(CartView::new(&cart, None)))
}
