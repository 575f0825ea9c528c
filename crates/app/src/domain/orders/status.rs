//! Order status labels and the transitions allowed between them.

use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Still acting as the user's cart.
    Placed,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Placed,
        Self::Processing,
        Self::Shipped,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "Placed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "OutForDelivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether an order may move from `self` directly to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Placed, Self::Processing | Self::Cancelled)
                | (Self::Processing, Self::Shipped | Self::Cancelled)
                | (Self::Shipped, Self::OutForDelivery | Self::Delivered)
                | (Self::OutForDelivery, Self::Delivered)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Items can only change while the order is still a cart.
    #[must_use]
    pub const fn items_editable(self) -> bool {
        matches!(self, Self::Placed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(
            "Pending".parse::<OrderStatus>(),
            Err(UnknownOrderStatus("Pending".to_string()))
        );
        assert!("placed".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn forward_transitions_are_allowed() {
        use OrderStatus::*;

        assert!(Placed.can_transition_to(Processing));
        assert!(Placed.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(OutForDelivery));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(OutForDelivery.can_transition_to(Delivered));
    }

    #[test]
    fn backward_and_same_status_transitions_are_rejected() {
        use OrderStatus::*;

        for status in OrderStatus::ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }

        assert!(!Processing.can_transition_to(Placed));
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Placed.can_transition_to(Shipped));
        assert!(!OutForDelivery.can_transition_to(Shipped));
    }

    #[test]
    fn terminal_statuses_have_no_exits() {
        for from in OrderStatus::ALL.into_iter().filter(|s| s.is_terminal()) {
            for to in OrderStatus::ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn only_placed_orders_are_editable() {
        let editable: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|s| s.items_editable())
            .collect();

        assert_eq!(editable, vec![OrderStatus::Placed]);
    }
}
