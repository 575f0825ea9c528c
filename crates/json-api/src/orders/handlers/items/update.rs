//! Update Order Item Handler

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

use eshop_app::domain::orders::data::OrderAccess;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderItemRequest {
    pub quantity: u32,
}

/// Update Order Item Handler
#[endpoint(
    tags("orders"),
    summary = "Set Order Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or item not found"),
        (status_code = StatusCode::CONFLICT, description = "Order can no longer be edited"),
    ),
)]
#[tracing::instrument(
    name = "orders.items.update",
    skip(order, item, json, depot),
    fields(order_uuid = tracing::field::Empty, item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    item: PathParam<Uuid>,
    json: JsonBody<UpdateOrderItemRequest>,
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
        .update_item(
            OrderAccess::for_identity(&identity),
            order.into(),
            item.into(),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use eshop_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        records::{OrderItemUuid, OrderUuid},
    };

    use crate::test_helpers::{Caller, MockServices, TEST_USER_UUID, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        MockServices {
            orders,
            ..MockServices::strict()
        }
        .into_service(
            Caller::Shopper,
            Router::with_path("orders/{order}/items/{item}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_item_sets_quantity() -> TestResult {
        let order = OrderUuid::new();
        let item = OrderItemUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_item()
            .once()
            .withf(move |_, o, i, quantity| *o == order && *i == item && *quantity == 4)
            .return_once(|_, o, _, _| Ok(make_order(o, TEST_USER_UUID)));

        let res = TestClient::put(format!("http://example.com/orders/{order}/items/{item}"))
            .json(&json!({ "quantity": 4 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_item_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_item()
            .once()
            .return_once(|_, _, _, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/items/{}",
            OrderUuid::new(),
            OrderItemUuid::new()
        ))
        .json(&json!({ "quantity": 4 }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
