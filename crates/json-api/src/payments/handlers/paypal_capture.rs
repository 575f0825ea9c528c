//! PayPal Capture Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, paypal_create::PayPalOrderResponse},
    state::State,
};

/// PayPal Capture Order Handler
///
/// Captures funds for an order the buyer has approved.
#[endpoint(
    tags("payments"),
    summary = "Capture PayPal Order",
    responses(
        (status_code = StatusCode::OK, description = "Order captured"),
        (status_code = StatusCode::BAD_GATEWAY, description = "PayPal request failed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "PayPal is not configured"),
    ),
)]
#[tracing::instrument(
    name = "payments.paypal.capture",
    skip(id, depot),
    fields(paypal_order = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PayPalOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    tracing::Span::current().record("paypal_order", id.as_str());

    let order = state
        .app
        .payments
        .capture_paypal_order(&id)
        .await
        .map_err(into_status_error)?;

    tracing::info!(paypal_order = %order.id, status = %order.status, "captured paypal order");

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshop_app::payments::{MockPaymentsService, PayPalOrder, PaymentsError};

    use crate::test_helpers::{Caller, MockServices};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        MockServices {
            payments,
            ..MockServices::strict()
        }
        .into_service(
            Caller::Anonymous,
            Router::with_path("payments/paypal/orders/{id}/capture").post(handler),
        )
    }

    #[tokio::test]
    async fn test_capture_returns_completed_order() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_capture_paypal_order()
            .once()
            .withf(|id| id == "5O190127TN364715T")
            .return_once(|id| {
                Ok(PayPalOrder {
                    id: id.to_string(),
                    status: "COMPLETED".to_string(),
                })
            });

        let mut res =
            TestClient::post("http://example.com/payments/paypal/orders/5O190127TN364715T/capture")
                .send(&make_service(payments))
                .await;

        let body: PayPalOrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "COMPLETED");

        Ok(())
    }

    #[tokio::test]
    async fn test_provider_failure_returns_502() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_capture_paypal_order().once().return_once(|_| {
            Err(PaymentsError::Provider {
                provider: "paypal",
                status: 422,
                message: "ORDER_NOT_APPROVED".to_string(),
            })
        });

        let res = TestClient::post("http://example.com/payments/paypal/orders/abc/capture")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
