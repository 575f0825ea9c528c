//! PayPal Create Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use eshop_app::payments::PayPalOrder;

use crate::{
    extensions::*,
    payments::{errors::into_status_error, stripe_intent::PaymentAmountRequest},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayPalOrderResponse {
    pub id: String,
    pub status: String,
}

impl From<PayPalOrder> for PayPalOrderResponse {
    fn from(order: PayPalOrder) -> Self {
        PayPalOrderResponse {
            id: order.id,
            status: order.status,
        }
    }
}

/// PayPal Create Order Handler
#[endpoint(
    tags("payments"),
    summary = "Create PayPal Order",
    responses(
        (status_code = StatusCode::OK, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid amount"),
        (status_code = StatusCode::BAD_GATEWAY, description = "PayPal request failed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "PayPal is not configured"),
    ),
)]
#[tracing::instrument(name = "payments.paypal.create", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<PaymentAmountRequest>,
    depot: &mut Depot,
) -> Result<Json<PayPalOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .payments
        .create_paypal_order(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(paypal_order = %order.id, "created paypal order");

    Ok(Json(order.into()))
}
