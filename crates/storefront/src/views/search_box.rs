//! Search input.

use serde::Serialize;

/// Search box state. Submitting reports the trimmed term if it is not blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchBox {
    value: String,
}

impl SearchBox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the input text.
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Handle Enter: the term to search for, or `None` when blank.
    #[must_use]
    pub fn submit(&self) -> Option<&str> {
        let term = self.value.trim();
        (!term.is_empty()).then_some(term)
    }
}
