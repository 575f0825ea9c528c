//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use eshop_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => {
            StatusError::conflict().brief("User already has an open order")
        }
        OrdersServiceError::UuidInUse => {
            StatusError::conflict().brief("An order or item with this uuid already exists")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product")
        }
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::NotEditable => {
            StatusError::conflict().brief("Order can no longer be edited")
        }
        error @ OrdersServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        error @ OrdersServiceError::InsufficientStock { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::EmptyOrder => StatusError::conflict().brief("Order has no items"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Only cancellation is permitted")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
