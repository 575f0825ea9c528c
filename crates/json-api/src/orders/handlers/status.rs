//! Order Status Handler

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

use eshop_app::domain::orders::{OrderStatus, data::OrderAccess};

use crate::{
    extensions::*,
    observability,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    pub status: String,
}

/// Order Status Handler
///
/// Admins may make any legal transition; owners may only cancel.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Owners may only cancel"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
    ),
)]
#[tracing::instrument(
    name = "orders.status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let order = order.into_inner();

    let status: OrderStatus = json
        .into_inner()
        .status
        .parse()
        .or_400("Unknown order status")?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let updated = state
        .app
        .orders
        .update_status(OrderAccess::for_identity(&identity), order.into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order, status = %updated.status, "order status changed");

    observability::record_order_status(updated.status);

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use eshop_app::domain::{
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{Caller, MockServices, TEST_USER_UUID, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService, caller: Caller) -> Service {
        MockServices {
            orders,
            ..MockServices::strict()
        }
        .into_service(
            caller,
            Router::with_path("orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_moves_order_to_processing() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |access, o, status| {
                *access == OrderAccess::Any && *o == uuid && *status == OrderStatus::Processing
            })
            .return_once(|_, o, status| {
                let mut record = make_order(o, TEST_USER_UUID);

                record.status = status;

                Ok(record)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "Processing" }))
            .send(&make_service(orders, Caller::Admin))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "Processing");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "Teleported" }))
        .send(&make_service(orders, Caller::Admin))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_owner_non_cancel_returns_403() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(|access, _, _| *access == OrderAccess::OwnedBy(TEST_USER_UUID))
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "Shipped" }))
        .send(&make_service(orders, Caller::Shopper))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_illegal_transition_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().once().return_once(|_, _, _| {
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Placed,
            })
        });

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "Placed" }))
        .send(&make_service(orders, Caller::Admin))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().once().return_once(|_, _, _| {
            Err(OrdersServiceError::InsufficientStock {
                product: ProductUuid::new(),
            })
        });

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "Processing" }))
        .send(&make_service(orders, Caller::Admin))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
