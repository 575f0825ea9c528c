//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eshop_app::domain::orders::{
    data::OrderAccess,
    records::{OrderItemRecord, OrderRecord},
};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub status: String,
    pub shipping_address1: String,
    pub shipping_address2: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub total_price: u64,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            status: order.status.to_string(),
            shipping_address1: order.shipping.shipping_address1,
            shipping_address2: order.shipping.shipping_address2,
            city: order.shipping.city,
            zip: order.shipping.zip,
            country: order.shipping.country,
            phone: order.shipping.phone,
            total_price: order.total_price,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Orders belonging to someone else are reported as missing.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let order = state
        .app
        .orders
        .get_order(OrderAccess::for_identity(&identity), order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
