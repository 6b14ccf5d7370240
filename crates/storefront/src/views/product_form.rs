//! Product edit form: validation and submission.
//!
//! Field values are kept as entered (the price as text) so a failed
//! validation or submission never loses what the user typed. Only a
//! validated [`ProductDraft`] ever reaches the submitter.
//!
//! Submission is split into [`ProductForm::begin_submit`] and
//! [`ProductForm::finish_submit`]; the submit control is disabled between
//! the two, which allows at most one submission in flight.

use std::future::Future;
use std::str::FromStr;

use cornerstore_core::{CategoryId, Product, ProductDraft, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::catalog::CatalogError;

/// Longest accepted product name, in characters.
pub const MAX_NAME_CHARS: usize = 255;

const MIN_PRICE: Decimal = Decimal::ONE;
const MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

/// Notification shown when the submitter fails.
pub const SUBMISSION_FAILED_MESSAGE: &str = "An unexpected error occurred";

/// Persists a validated product.
///
/// `id` is `None` for a new product.
pub trait ProductSubmitter {
    fn submit_product(
        &self,
        id: Option<ProductId>,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormValues {
    #[serde(default)]
    pub name: String,
    /// Accepts a JSON string or number.
    #[serde(default, deserialize_with = "price_text")]
    pub price: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Price,
    #[serde(rename = "categoryId")]
    Category,
}

/// Validation failure attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

/// Transient notification (toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
}

/// Errors returned by form submission.
#[derive(Debug, Error)]
pub enum FormError {
    /// One or more fields failed validation.
    #[error("Invalid product: {}", join_messages(.0))]
    Invalid(Vec<FieldError>),

    /// The submit control is disabled while a submission is in flight.
    #[error("A submission is already in progress")]
    InFlight,

    /// The submitter rejected the product.
    #[error("Submission failed: {0}")]
    Submission(#[source] CatalogError),
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Product form state.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    product_id: Option<ProductId>,
    values: ProductFormValues,
    errors: Vec<FieldError>,
    submitting: bool,
    notification: Option<Notification>,
}

impl ProductForm {
    /// Empty form for a new product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated with an existing product.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        Self::with_values(
            Some(product.id),
            ProductFormValues {
                name: product.name.clone(),
                price: product.price.to_string(),
                category_id: Some(product.category_id),
            },
        )
    }

    /// Form holding already-entered values.
    #[must_use]
    pub fn with_values(product_id: Option<ProductId>, values: ProductFormValues) -> Self {
        Self {
            product_id,
            values,
            ..Self::default()
        }
    }

    /// The product being edited, `None` when creating.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    #[must_use]
    pub const fn values(&self) -> &ProductFormValues {
        &self.values
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.values.name = name.into();
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.values.price = price.into();
    }

    pub const fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.values.category_id = category_id;
    }

    /// Errors from the last validation.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The error shown under a field, if any.
    #[must_use]
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Whether the submit control is disabled.
    #[must_use]
    pub const fn is_submit_disabled(&self) -> bool {
        self.submitting
    }

    /// The pending notification, if any.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Validate and, if valid, disable the submit control.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InFlight` while a submission is pending and
    /// `FormError::Invalid` with every failing field otherwise.
    pub fn begin_submit(&mut self) -> Result<ProductDraft, FormError> {
        if self.submitting {
            return Err(FormError::InFlight);
        }

        match validate(&self.values) {
            Ok(draft) => {
                self.errors.clear();
                self.notification = None;
                self.submitting = true;
                Ok(draft)
            }
            Err(errors) => {
                self.errors.clone_from(&errors);
                Err(FormError::Invalid(errors))
            }
        }
    }

    /// Re-enable the submit control with the submitter's outcome.
    ///
    /// Failures raise a notification; entered values are kept either way.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Submission` if the submitter failed.
    pub fn finish_submit(
        &mut self,
        result: Result<Product, CatalogError>,
    ) -> Result<Product, FormError> {
        self.submitting = false;
        match result {
            Ok(product) => {
                tracing::info!(product_id = %product.id, "Product saved");
                Ok(product)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Product submission failed");
                self.notification = Some(Notification {
                    message: SUBMISSION_FAILED_MESSAGE.to_string(),
                });
                Err(FormError::Submission(e))
            }
        }
    }

    /// Validate, hand the draft to `submitter`, and record the outcome.
    ///
    /// # Errors
    ///
    /// See [`begin_submit`](Self::begin_submit) and
    /// [`finish_submit`](Self::finish_submit).
    pub async fn submit<S: ProductSubmitter>(
        &mut self,
        submitter: &S,
    ) -> Result<Product, FormError> {
        let draft = self.begin_submit()?;
        let result = submitter.submit_product(self.product_id, &draft).await;
        self.finish_submit(result)
    }
}

/// Check every field, collecting all failures.
///
/// # Errors
///
/// Returns the failing fields in form order.
pub fn validate(values: &ProductFormValues) -> Result<ProductDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = values.name.trim();
    if name.is_empty() {
        errors.push(FieldError {
            field: Field::Name,
            message: "Name is required",
        });
    } else if name.chars().count() > MAX_NAME_CHARS {
        errors.push(FieldError {
            field: Field::Name,
            message: "Name must be at most 255 characters",
        });
    }

    // Unparseable input counts as missing
    let price = Decimal::from_str(values.price.trim()).ok();
    match price {
        None => errors.push(FieldError {
            field: Field::Price,
            message: "Price is required",
        }),
        Some(p) if p < MIN_PRICE => errors.push(FieldError {
            field: Field::Price,
            message: "Price must be greater than or equal to 1",
        }),
        Some(p) if p > MAX_PRICE => errors.push(FieldError {
            field: Field::Price,
            message: "Price must be less than or equal to 1000",
        }),
        Some(_) => {}
    }

    if values.category_id.is_none() {
        errors.push(FieldError {
            field: Field::Category,
            message: "Category is required",
        });
    }

    match (price, values.category_id) {
        (Some(price), Some(category_id)) if errors.is_empty() => Ok(ProductDraft {
            name: name.to_string(),
            price,
            category_id,
        }),
        _ => Err(errors),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

fn price_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<PriceInput>::deserialize(deserializer)? {
        Some(PriceInput::Text(text)) => text,
        Some(PriceInput::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
