//! Payment Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use eshop_app::payments::PaymentsError;

pub(crate) fn into_status_error(error: PaymentsError) -> StatusError {
    match error {
        PaymentsError::NotConfigured(provider) => StatusError::service_unavailable()
            .brief(format!("{provider} payments are not configured")),
        PaymentsError::InvalidAmount => {
            StatusError::bad_request().brief("Amount must be greater than zero")
        }
        PaymentsError::Webhook(source) => {
            warn!("rejected webhook: {source}");

            StatusError::bad_request().brief("Invalid webhook signature")
        }
        error @ PaymentsError::Provider { .. } => {
            error!("payment provider error: {error}");

            StatusError::bad_gateway()
        }
        PaymentsError::Http(source) => {
            error!("payment provider unreachable: {source}");

            StatusError::bad_gateway()
        }
    }
}
