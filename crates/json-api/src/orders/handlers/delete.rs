//! Delete Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Delete Order Handler
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.delete",
    skip(order, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    state
        .app
        .orders
        .delete_order(order.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order, "deleted order");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use eshop_app::domain::orders::{
        MockOrdersService, OrdersServiceError, records::OrderUuid,
    };

    use crate::test_helpers::{Caller, MockServices};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        MockServices {
            orders,
            ..MockServices::strict()
        }
        .into_service(Caller::Admin, Router::with_path("orders/{order}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_order_success() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .withf(move |o| *o == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
