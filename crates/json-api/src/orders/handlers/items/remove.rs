//! Remove Order Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use eshop_app::domain::orders::data::OrderAccess;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Remove Order Item Handler
///
/// Returns the order with its total recomputed without the removed line.
#[endpoint(
    tags("orders"),
    summary = "Remove Order Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or item not found"),
        (status_code = StatusCode::CONFLICT, description = "Order can no longer be edited"),
    ),
)]
#[tracing::instrument(
    name = "orders.items.remove",
    skip(order, item, depot),
    fields(order_uuid = tracing::field::Empty, item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let order = order.into_inner();
    let item = item.into_inner();

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("item_uuid", tracing::field::display(item));

    let updated = state
        .app
        .orders
        .remove_item(
            OrderAccess::for_identity(&identity),
            order.into(),
            item.into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
