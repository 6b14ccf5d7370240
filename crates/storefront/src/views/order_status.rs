//! Order status dropdown.

use cornerstore_core::OrderStatus;

/// Status selector reporting each selection to `on_change`.
pub struct OrderStatusSelector<F> {
    selected: OrderStatus,
    on_change: F,
}

impl<F: FnMut(OrderStatus)> OrderStatusSelector<F> {
    /// Selector with `New` selected.
    pub fn new(on_change: F) -> Self {
        Self {
            selected: OrderStatus::default(),
            on_change,
        }
    }

    #[must_use]
    pub const fn selected(&self) -> OrderStatus {
        self.selected
    }

    /// `(value, label)` pairs in display order.
    #[must_use]
    pub fn options(&self) -> Vec<(&'static str, &'static str)> {
        OrderStatus::ALL
            .iter()
            .map(|status| (status.as_str(), status.label()))
            .collect()
    }

    pub fn select(&mut self, status: OrderStatus) {
        self.selected = status;
        (self.on_change)(status);
    }
}

impl<F> std::fmt::Debug for OrderStatusSelector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStatusSelector")
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_new() {
        let selector = OrderStatusSelector::new(|_| {});
        assert_eq!(selector.selected(), OrderStatus::New);
    }

    #[test]
    fn test_options() {
        let selector = OrderStatusSelector::new(|_| {});
        assert_eq!(
            selector.options(),
            [
                ("new", "New"),
                ("processed", "Processed"),
                ("fulfilled", "Fulfilled"),
            ]
        );
    }

    #[test]
    fn test_select_reports_value() {
        let mut reported = Vec::new();
        let mut selector = OrderStatusSelector::new(|status: OrderStatus| {
            reported.push(status.as_str());
        });

        selector.select(OrderStatus::Processed);
        assert_eq!(selector.selected(), OrderStatus::Processed);
        drop(selector);

        assert_eq!(reported, ["processed"]);
    }
}
