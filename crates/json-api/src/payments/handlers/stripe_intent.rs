//! Stripe Payment Intent Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use eshop_app::payments::PaymentRequest;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// An amount to charge, in minor units.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct PaymentAmountRequest {
    pub amount: u64,
    pub currency: Option<String>,
}

impl From<PaymentAmountRequest> for PaymentRequest {
    fn from(request: PaymentAmountRequest) -> Self {
        PaymentRequest {
            amount: request.amount,
            currency: request.currency,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StripeIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Stripe Payment Intent Handler
#[endpoint(
    tags("payments"),
    summary = "Create Stripe Payment Intent",
    responses(
        (status_code = StatusCode::OK, description = "Intent created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid amount"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Stripe request failed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Stripe is not configured"),
    ),
)]
#[tracing::instrument(name = "payments.stripe.intent", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<PaymentAmountRequest>,
    depot: &mut Depot,
) -> Result<Json<StripeIntentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let intent = state
        .app
        .payments
        .create_stripe_intent(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(payment_intent = %intent.id, "created payment intent");

    Ok(Json(StripeIntentResponse {
        client_secret: intent.client_secret,
    }))
}
