//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use eshop_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown category")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Deletion fails on a foreign key only while order items still point at the product.
pub(crate) fn into_delete_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::InvalidReference => {
            StatusError::conflict().brief("Product is referenced by orders")
        }
        other => into_status_error(other),
    }
}
