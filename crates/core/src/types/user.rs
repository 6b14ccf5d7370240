//! Shopper identity as known to the storefront.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}
