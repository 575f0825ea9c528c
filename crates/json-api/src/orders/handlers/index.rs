//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Every order in the store, newest first.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshop_app::domain::{
        orders::{MockOrdersService, records::OrderUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::{Caller, MockServices, make_order};

    use super::*;

    #[tokio::test]
    async fn test_index_lists_all_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(|| {
            Ok(vec![
                make_order(OrderUuid::new(), UserUuid::new()),
                make_order(OrderUuid::new(), UserUuid::new()),
            ])
        });

        let service = MockServices {
            orders,
            ..MockServices::strict()
        }
        .into_service(Caller::Admin, Router::with_path("orders").get(handler));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&service)
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.orders.len(), 2);

        Ok(())
    }
}
