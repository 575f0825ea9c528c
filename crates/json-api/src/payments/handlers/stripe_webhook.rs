//! Stripe Webhook Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    observability::{self, WebhookOutcome},
    payments::errors::into_status_error,
    state::State,
};

/// Header carrying the delivery's timestamp and signatures.
pub(crate) const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

const PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookAck {
    pub received: bool,
}

/// Stripe Webhook Handler
///
/// The raw body must be verified before it is parsed, so this reads the
/// payload itself rather than through `JsonBody`.
#[endpoint(
    tags("payments"),
    summary = "Stripe Webhook",
    responses(
        (status_code = StatusCode::OK, description = "Event accepted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid signature"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Webhook secret is not configured"),
    ),
)]
#[tracing::instrument(
    name = "payments.stripe.webhook",
    skip(req, depot),
    fields(event_id = tracing::field::Empty, event_type = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<WebhookAck>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let signature = req
        .header::<String>(STRIPE_SIGNATURE_HEADER)
        .ok_or_else(|| StatusError::bad_request().brief("Missing Stripe-Signature header"))?;

    let payload = req.payload().await.or_400("Unreadable webhook body")?;

    let event = state
        .app
        .payments
        .verify_stripe_webhook(payload, &signature)
        .map_err(|error| {
            observability::record_stripe_webhook(WebhookOutcome::Rejected);
            into_status_error(error)
        })?;

    let span = tracing::Span::current();

    span.record("event_id", event.id.as_str());
    span.record("event_type", event.event_type.as_str());

    if event.event_type == PAYMENT_INTENT_SUCCEEDED {
        tracing::info!(
            payment_intent = event.object_id().unwrap_or_default(),
            "payment succeeded"
        );
        observability::record_stripe_webhook(WebhookOutcome::Handled);
    } else {
        tracing::info!(event_type = %event.event_type, "unhandled stripe event");
        observability::record_stripe_webhook(WebhookOutcome::Ignored);
    }

    Ok(Json(WebhookAck { received: true }))
}
