//! App Router

use std::path::Path;

use salvo::{Router, serve_static::StaticDir};

use crate::{
    auth, categories, healthcheck, observability, orders, payments, products,
    uploads::UPLOADS_ROUTE, users,
};

/// Every route the server answers, grouped by who may call it.
///
/// Groups that share a path are tried in order, so a method missing from the
/// public group falls through to the authenticated ones.
pub(crate) fn app_router(uploads_dir: &Path) -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path(format!("{UPLOADS_ROUTE}/{{**path}}"))
                .get(StaticDir::new([uploads_dir.to_path_buf()])),
        )
        .push(
            Router::with_path("api/v1")
                .push(public_router())
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .push(shopper_router())
                        .push(
                            Router::new()
                                .hoop(auth::middleware::require_admin)
                                .push(admin_router()),
                        ),
                ),
        )
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("get/count").get(products::count::handler))
                .push(Router::with_path("get/featured/{count}").get(products::featured::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("{category}").get(categories::get::handler)),
        )
        .push(
            Router::with_path("users")
                .push(Router::with_path("register").post(users::register::handler))
                .push(Router::with_path("login").post(users::login::handler)),
        )
        .push(
            Router::with_path("payments")
                .push(Router::with_path("stripe/intents").post(payments::stripe_intent::handler))
                .push(Router::with_path("stripe/webhook").post(payments::stripe_webhook::handler))
                .push(
                    Router::with_path("paypal/orders")
                        .post(payments::paypal_create::handler)
                        .push(
                            Router::with_path("{id}/capture")
                                .post(payments::paypal_capture::handler),
                        ),
                ),
        )
}

fn shopper_router() -> Router {
    Router::new()
        .push(
            Router::with_path("users")
                .push(Router::with_path("logout").post(users::logout::handler))
                .push(Router::with_path("{user}").get(users::get::handler)),
        )
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("active").get(orders::active::handler))
                .push(Router::with_path("get/userorder/{user}").get(orders::user_orders::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .put(orders::update::handler)
                        .push(Router::with_path("status").put(orders::status::handler))
                        .push(
                            Router::with_path("items")
                                .post(orders::items::add::handler)
                                .push(
                                    Router::with_path("{item}")
                                        .put(orders::items::update::handler)
                                        .delete(orders::items::remove::handler),
                                ),
                        ),
                ),
        )
}

fn admin_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("image").put(products::image::handler))
                        .push(Router::with_path("gallery-images").put(products::gallery::handler)),
                ),
        )
        .push(
            Router::with_path("categories")
                .post(categories::create::handler)
                .push(
                    Router::with_path("{category}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .post(users::create::handler)
                .push(Router::with_path("get/count").get(users::count::handler))
                .push(Router::with_path("{user}").delete(users::delete::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("get/totalsales").get(orders::total_sales::handler))
                .push(Router::with_path("get/count").get(orders::count::handler))
                .push(Router::with_path("{order}").delete(orders::delete::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use eshop_app::{
        auth::{AuthServiceError, Identity, MockAuthService},
        domain::{
            orders::{MockOrdersService, records::OrderUuid},
            products::{MockProductsService, records::ProductUuid},
        },
        health::MockHealthService,
    };

    use crate::test_helpers::{MockServices, TEST_SESSION_UUID, TEST_USER_UUID, make_order};

    use super::*;

    const TOKEN: &str = "Bearer es_v1_test.token";

    fn make_service(services: MockServices) -> Service {
        let dir = services.uploads.dir().clone();

        Service::new(
            Router::new()
                .hoop(inject(services.into_state()))
                .push(app_router(&dir)),
        )
    }

    fn shopper_auth() -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().once().return_once(|_| {
            Ok(Identity {
                session_uuid: TEST_SESSION_UUID,
                user_uuid: TEST_USER_UUID,
                is_admin: false,
            })
        });

        auth
    }

    #[tokio::test]
    async fn test_catalog_reads_need_no_token() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/api/v1/products")
            .send(&make_service(MockServices {
                products,
                ..MockServices::strict()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_without_token_return_401() -> TestResult {
        let res = TestClient::get("http://example.com/api/v1/orders/active")
            .send(&make_service(MockServices::strict()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_writes_without_token_return_401() -> TestResult {
        let res = TestClient::delete(format!(
            "http://example.com/api/v1/products/{}",
            ProductUuid::new()
        ))
        .send(&make_service(MockServices::strict()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_revoked_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com/api/v1/orders/active")
            .add_header(AUTHORIZATION, TOKEN, true)
            .send(&make_service(MockServices {
                auth,
                ..MockServices::strict()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_shopper_on_admin_route_returns_403() -> TestResult {
        let res = TestClient::get("http://example.com/api/v1/orders/get/totalsales")
            .add_header(AUTHORIZATION, TOKEN, true)
            .send(&make_service(MockServices {
                auth: shopper_auth(),
                ..MockServices::strict()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_active_order_is_not_taken_for_an_order_uuid() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_active_order()
            .once()
            .return_once(|user| Ok(make_order(OrderUuid::new(), user)));

        let res = TestClient::get("http://example.com/api/v1/orders/active")
            .add_header(AUTHORIZATION, TOKEN, true)
            .send(&make_service(MockServices {
                auth: shopper_auth(),
                orders,
                ..MockServices::strict()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_is_public() -> TestResult {
        let mut health = MockHealthService::new();

        health
            .expect_check_database()
            .once()
            .return_once(|| Ok(()));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(MockServices {
                health,
                ..MockServices::strict()
            }))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["status"], "ok");

        Ok(())
    }
}
