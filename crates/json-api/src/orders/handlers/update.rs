//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use eshop_app::domain::orders::data::OrderAccess;

use crate::{
    extensions::*,
    orders::{create::ShippingRequest, errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Update Order Handler
///
/// Replaces the shipping details of an order that has not been delivered or
/// cancelled.
#[endpoint(
    tags("orders"),
    summary = "Update Order Shipping",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is closed"),
    ),
)]
#[tracing::instrument(
    name = "orders.update",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<ShippingRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let updated = state
        .app
        .orders
        .update_order(
            OrderAccess::for_identity(&identity),
            order.into(),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
