//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{orders::status::OrderStatus, products::records::ProductUuid};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// The user already has a `Placed` order.
    #[error("order already exists")]
    AlreadyExists,

    /// A caller-chosen order or item uuid collides with an existing row.
    #[error("uuid is already in use")]
    UuidInUse,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("order can no longer be edited")]
    NotEditable,

    #[error("order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("not enough stock of product {product}")]
    InsufficientStock { product: ProductUuid },

    #[error("order has no items")]
    EmptyOrder,

    #[error("status change not permitted")]
    Forbidden,

    #[error("storage error")]
    Sql(#[source] Error),
}

/// SQLSTATE raised when arithmetic leaves the column's range.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Some(mapped) => mapped,
            None => Self::Sql(error),
        }
    }
}

fn classify(error: &Error) -> Option<OrdersServiceError> {
    match error {
        Error::RowNotFound => return Some(OrdersServiceError::NotFound),
        Error::Encode(_) => return Some(OrdersServiceError::InvalidData),
        _ => {}
    }

    let database_error = error.as_database_error()?;

    if database_error.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
        return Some(OrdersServiceError::InvalidData);
    }

    match database_error.kind() {
        ErrorKind::UniqueViolation if is_primary_key(database_error) => {
            Some(OrdersServiceError::UuidInUse)
        }
        ErrorKind::UniqueViolation => Some(OrdersServiceError::AlreadyExists),
        ErrorKind::ForeignKeyViolation => Some(OrdersServiceError::InvalidReference),
        ErrorKind::NotNullViolation => Some(OrdersServiceError::MissingRequiredData),
        ErrorKind::CheckViolation => Some(OrdersServiceError::InvalidData),
        _ => None,
    }
}

fn is_primary_key(error: &dyn DatabaseError) -> bool {
    error
        .constraint()
        .is_some_and(|constraint| constraint.ends_with("_pkey"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_names_both_statuses() {
        let error = OrdersServiceError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Placed,
        };

        assert_eq!(error.to_string(), "order cannot move from Delivered to Placed");
    }

    #[test]
    fn encode_failures_map_to_invalid_data() {
        assert!(matches!(
            OrdersServiceError::from(Error::Encode("total_price: out of range".into())),
            OrdersServiceError::InvalidData
        ));
    }
}
