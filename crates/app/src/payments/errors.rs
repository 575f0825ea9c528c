//! Payment errors.

use thiserror::Error;

use crate::payments::webhook::WebhookError;

#[derive(Debug, Error)]
pub enum PaymentsError {
    /// Credentials for the provider were not supplied.
    #[error("{0} payments are not configured")]
    NotConfigured(&'static str),

    #[error("payment amount must be greater than zero")]
    InvalidAmount,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("{provider} request failed with status {status}: {message}")]
    Provider {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("webhook rejected: {0}")]
    Webhook(#[from] WebhookError),
}
