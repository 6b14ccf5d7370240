//! Long text collapsed behind a "Show More" toggle.

use serde::Serialize;

/// Characters shown while collapsed.
pub const COLLAPSED_CHARS: usize = 255;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandableText {
    text: String,
    expanded: bool,
}

impl ExpandableText {
    /// Collapsed view of `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expanded: false,
        }
    }

    /// Whether the text is long enough to need a toggle.
    #[must_use]
    pub fn is_truncatable(&self) -> bool {
        self.text.chars().count() > COLLAPSED_CHARS
    }

    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The text as currently displayed.
    #[must_use]
    pub fn display(&self) -> String {
        if self.expanded || !self.is_truncatable() {
            return self.text.clone();
        }

        let mut shown: String = self.text.chars().take(COLLAPSED_CHARS).collect();
        shown.push_str(ELLIPSIS);
        shown
    }

    /// Label of the toggle, absent for short texts.
    #[must_use]
    pub fn toggle_label(&self) -> Option<&'static str> {
        if !self.is_truncatable() {
            return None;
        }
        Some(if self.expanded { "Show Less" } else { "Show More" })
    }

    pub fn toggle(&mut self) {
        if self.is_truncatable() {
            self.expanded = !self.expanded;
        }
    }
}
