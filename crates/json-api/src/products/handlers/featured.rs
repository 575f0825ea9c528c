//! Featured Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductsResponse},
    state::State,
};

/// Featured Products Handler
///
/// Returns at most `count` featured products, newest first.
#[endpoint(tags("products"), summary = "List Featured Products")]
pub(crate) async fn handler(
    count: PathParam<u32>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .featured_products(count.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshop_app::domain::products::{MockProductsService, records::ProductUuid};

    use crate::test_helpers::{Caller, MockServices, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        MockServices {
            products,
            ..MockServices::strict()
        }
        .into_service(
            Caller::Anonymous,
            Router::with_path("products/get/featured/{count}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_featured_passes_limit() -> TestResult {
        let product = make_product(ProductUuid::new());

        let mut products = MockProductsService::new();

        products
            .expect_featured_products()
            .once()
            .withf(|limit| *limit == 3)
            .return_once(move |_| Ok(vec![product]));

        let mut res = TestClient::get("http://example.com/products/get/featured/3")
            .send(&make_service(products))
            .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_featured_rejects_negative_count() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_featured_products().never();

        let res = TestClient::get("http://example.com/products/get/featured/-1")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
