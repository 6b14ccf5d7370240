//! Remote data state shared by the views that fetch from the catalog.

use serde::Serialize;

use crate::catalog::CatalogError;

/// Progress of a catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum FetchState<T> {
    /// Request in flight (skeleton shown).
    Loading,
    /// Data arrived.
    Loaded(T),
    /// Request failed; holds the message to show.
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> FetchState<T> {
    /// Settle the state from a fetch result.
    #[must_use]
    pub fn from_result(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(data) => Self::Loaded(data),
            Err(e) => {
                tracing::warn!(error = %e, "Catalog fetch failed");
                Self::Failed(format!("Error: {e}"))
            }
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The fetched data, once loaded.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// The error message, once failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_loading() {
        let state: FetchState<Vec<u8>> = FetchState::default();
        assert!(state.is_loading());
        assert!(state.loaded().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_from_result() {
        let loaded = FetchState::from_result(Ok(vec![1, 2]));
        assert_eq!(loaded.loaded(), Some(&vec![1, 2]));

        let failed: FetchState<Vec<u8>> =
            FetchState::from_result(Err(CatalogError::NotFound("products".to_string())));
        let message = failed.error().unwrap_or_default();
        assert!(message.starts_with("Error"), "{message}");
    }
}
