//! Payment Handlers

pub(crate) mod paypal_capture;
pub(crate) mod paypal_create;
pub(crate) mod stripe_intent;
pub(crate) mod stripe_webhook;
