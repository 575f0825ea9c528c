//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use eshop_app::domain::{
    orders::{
        data::{NewOrder, NewOrderLine, ShippingDetails},
        records::OrderUuid,
    },
    products::records::ProductUuid,
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Where an order ships to.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ShippingRequest {
    pub shipping_address1: String,
    #[serde(default)]
    pub shipping_address2: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
}

impl From<ShippingRequest> for ShippingDetails {
    fn from(request: ShippingRequest) -> Self {
        ShippingDetails {
            shipping_address1: request.shipping_address1,
            shipping_address2: request.shipping_address2,
            city: request.city,
            zip: request.zip,
            country: request.country,
            phone: request.phone,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub uuid: Option<Uuid>,
    #[serde(flatten)]
    pub shipping: ShippingRequest,
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

/// Create Order Handler
///
/// The caller always owns the new order. Unit prices are captured from the
/// catalog and the total is computed server side.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or unknown product"),
        (status_code = StatusCode::CONFLICT, description = "User already has an open order"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(order_uuid = tracing::field::Empty, user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let request = json.into_inner();

    let new_order = NewOrder {
        uuid: request.uuid.map_or_else(OrderUuid::new, OrderUuid::from_uuid),
        user_uuid: identity.user_uuid,
        shipping: request.shipping.into(),
        items: request
            .items
            .into_iter()
            .map(|line| NewOrderLine {
                product_uuid: ProductUuid::from_uuid(line.product_uuid),
                quantity: line.quantity,
            })
            .collect(),
    };

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(new_order.uuid));
    span.record("user_uuid", tracing::field::display(new_order.user_uuid));

    let order = state
        .app
        .orders
        .create_order(new_order)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/v1/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(
        order_uuid = %order.uuid,
        total_price = order.total_price,
        "created order"
    );

    Ok(Json(order.into()))
}
