//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order processing status.
///
/// Serialized in lowercase (`new`, `processed`, `fulfilled`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Processed,
    Fulfilled,
}

impl OrderStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 3] = [Self::New, Self::Processed, Self::Fulfilled];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Processed => "Processed",
            Self::Fulfilled => "Fulfilled",
        }
    }

    /// Wire value, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Processed => "processed",
            Self::Fulfilled => "fulfilled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
