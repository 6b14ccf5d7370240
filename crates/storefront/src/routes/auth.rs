//! Authentication route handlers.
//!
//! Identity is owned by an external provider; the storefront only ends the
//! local session.

use axum::http::StatusCode;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user};
use crate::models::SessionCart;

/// Log out: drop the cart and destroy the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    SessionCart::new(session.clone()).forget().await?;
    session.flush().await?;
    clear_sentry_user();

    tracing::info!("Session ended");
    Ok(StatusCode::NO_CONTENT)
}
