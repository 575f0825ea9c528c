//! Add Order Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use eshop_app::domain::{
    orders::{
        data::{NewOrderItem, OrderAccess},
        records::OrderItemUuid,
    },
    products::records::ProductUuid,
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct AddOrderItemRequest {
    pub uuid: Option<Uuid>,
    pub product_uuid: Uuid,
    pub quantity: u32,
}

/// Add Order Item Handler
///
/// Adding a product already on the order increases that line's quantity.
#[endpoint(
    tags("orders"),
    summary = "Add Order Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product or bad quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order can no longer be edited"),
    ),
)]
#[tracing::instrument(
    name = "orders.items.add",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<AddOrderItemRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let order = order.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("product_uuid", tracing::field::display(request.product_uuid));

    let item = NewOrderItem {
        uuid: request
            .uuid
            .map_or_else(OrderItemUuid::new, OrderItemUuid::from_uuid),
        product_uuid: ProductUuid::from_uuid(request.product_uuid),
        quantity: request.quantity,
    };

    let updated = state
        .app
        .orders
        .add_item(OrderAccess::for_identity(&identity), order.into(), item)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
