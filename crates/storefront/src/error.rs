//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; responses are JSON `{"error": ..., "fields": [...]}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::views::{FieldError, FormError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog service request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Product form rejected or failed to submit.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldError]>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(err) | Self::Form(FormError::Submission(err)) if err.is_not_found() => {
                StatusCode::NOT_FOUND
            }
            Self::Catalog(_) | Self::Form(FormError::Submission(_)) => StatusCode::BAD_GATEWAY,
            Self::Cart(_) => StatusCode::BAD_REQUEST,
            Self::Form(FormError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Form(FormError::InFlight) => StatusCode::CONFLICT,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Catalog(err) if err.is_not_found() => self.to_string(),
            Self::Catalog(_) => "Catalog service error".to_string(),
            Self::Form(FormError::Submission(err)) if err.is_not_found() => {
                crate::views::product_detail::NOT_FOUND_MESSAGE.to_string()
            }
            Self::Form(FormError::Submission(_)) => {
                crate::views::product_form::SUBMISSION_FAILED_MESSAGE.to_string()
            }
            Self::Session(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let fields = match &self {
            Self::Form(FormError::Invalid(fields)) => Some(fields.as_slice()),
            _ => None,
        };

        let body = ErrorBody {
            error: message,
            fields,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the session.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Item added", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cornerstore_core::ProductId;

    use super::*;
    use crate::views::Field;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/nowhere".to_string());
        assert_eq!(err.to_string(), "Not found: /nowhere");

        let err = AppError::from(CartError::InvalidProductId(ProductId::new(0)));
        assert!(err.to_string().starts_with("Cart error"));
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(CatalogError::NotFound("product 1".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CartError::InvalidProductId(ProductId::new(0)).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(FormError::Invalid(Vec::new()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(FormError::InFlight.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(
                CatalogError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                }
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_submission_to_unknown_product_is_not_found() {
        let err = AppError::from(FormError::Submission(CatalogError::NotFound(
            "product 99".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "The given product was not found.");

        let err = AppError::from(FormError::Submission(CatalogError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        }));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_validation_errors_list_fields() {
        let err = AppError::from(FormError::Invalid(vec![FieldError {
            field: Field::Name,
            message: "Name is required",
        }]));

        let json = body_json(err.into_response()).await;
        assert_eq!(
            json["fields"],
            serde_json::json!([{"field": "name", "message": "Name is required"}])
        );
    }

    #[tokio::test]
    async fn test_catalog_failure_hides_details() {
        let err = AppError::from(CatalogError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "stack trace".to_string(),
        });

        let json = body_json(err.into_response()).await;
        assert_eq!(json["error"], "Catalog service error");
        assert!(json.get("fields").is_none());
    }
}
