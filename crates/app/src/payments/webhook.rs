//! Stripe webhook signature verification.
//!
//! The `Stripe-Signature` header carries `t=<unix seconds>` and one or more
//! `v1=<hex>` entries, each an HMAC-SHA256 of `"{t}.{payload}"`.

use hmac::{Hmac, Mac};
use jiff::Timestamp;
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;
use thiserror::Error;

use crate::auth::decode_hex;

/// Maximum age, in seconds, of a signed webhook.
pub const STRIPE_SIGNATURE_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("signature header is malformed")]
    MalformedHeader,

    #[error("signature timestamp is outside the tolerance window")]
    Expired,

    #[error("no signature matches the payload")]
    SignatureMismatch,

    #[error("event payload is not valid json")]
    Payload(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StripeEvent {
    pub id: String,

    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default)]
    pub data: StripeEventData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StripeEventData {
    #[serde(default)]
    pub object: Value,
}

impl StripeEvent {
    /// Id of the object the event is about, such as a payment intent.
    #[must_use]
    pub fn object_id(&self) -> Option<&str> {
        self.data.object.get("id").and_then(Value::as_str)
    }
}

/// Check `header` against `payload` and decode the event.
///
/// # Errors
///
/// Returns an error when the header is malformed, too old, does not match,
/// or the payload is not an event.
pub fn verify_stripe_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: Timestamp,
) -> Result<StripeEvent, WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| WebhookError::MalformedHeader)?,
                );
            }
            Some(("v1", value)) => signatures.push(value),
            Some(_) => {}
            None => return Err(WebhookError::MalformedHeader),
        }
    }

    let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;

    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader);
    }

    let skew = now
        .as_second()
        .checked_sub(timestamp)
        .and_then(i64::checked_abs)
        .ok_or(WebhookError::Expired)?;

    if skew > STRIPE_SIGNATURE_TOLERANCE_SECS {
        return Err(WebhookError::Expired);
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::SignatureMismatch)?;

    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures
        .into_iter()
        .filter_map(decode_hex)
        .any(|signature| mac.clone().verify_slice(&signature).is_ok());

    if !matched {
        return Err(WebhookError::SignatureMismatch);
    }

    serde_json::from_slice(payload).map_err(WebhookError::Payload)
}
