//! Card and wallet payment providers.

mod errors;
mod paypal;
mod service;
mod stripe;
mod webhook;

pub use errors::PaymentsError;
pub use paypal::{PAYPAL_SANDBOX_API_BASE, PayPalClient, PayPalOrder, format_minor_units};
pub use service::*;
pub use stripe::{STRIPE_API_BASE, StripeClient, StripePaymentIntent};
pub use webhook::{
    STRIPE_SIGNATURE_TOLERANCE_SECS, StripeEvent, StripeEventData, WebhookError,
    verify_stripe_signature,
};
