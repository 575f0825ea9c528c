//! Product Gallery Upload Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
    uploads::MAX_GALLERY_IMAGES,
};

const FIELD: &str = "images";

/// Product Gallery Upload Handler
///
/// Replaces the product's gallery with the png or jpeg files sent in the
/// `images` field.
#[endpoint(
    tags("products"),
    summary = "Upload Product Gallery",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Gallery stored"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing, too many or unsupported files"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.gallery",
    skip(product, req, depot),
    fields(
        product_uuid = tracing::field::Empty,
        images_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));

    state
        .app
        .products
        .get_product(product.into())
        .await
        .map_err(into_status_error)?;

    let parts = req
        .files(FIELD)
        .await
        .filter(|parts| !parts.is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("No images in the request"))?;

    if parts.len() > MAX_GALLERY_IMAGES {
        return Err(StatusError::bad_request().brief("Too many images"));
    }

    span.record("images_count", tracing::field::display(parts.len()));

    let mut urls = Vec::with_capacity(parts.len());

    for part in parts {
        urls.push(state.uploads.save(FIELD, part).await?);
    }

    let product = state
        .app
        .products
        .set_product_images(product.into(), urls)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshop_app::domain::products::{MockProductsService, records::ProductUuid};

    use crate::{
        products::image::tests::multipart,
        test_helpers::{Caller, MockServices, make_product},
        uploads::UploadStore,
    };

    use super::*;

    fn make_service(products: MockProductsService, uploads: UploadStore) -> Service {
        MockServices {
            products,
            uploads,
            ..MockServices::strict()
        }
        .into_service(
            Caller::Admin,
            Router::with_path("products/{product}/gallery-images").put(handler),
        )
    }

    #[tokio::test]
    async fn test_gallery_stores_every_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(move |_| Ok(make_product(uuid)));

        products
            .expect_set_product_images()
            .once()
            .withf(move |u, urls| *u == uuid && urls.len() == 2)
            .return_once(move |_, urls| {
                let mut product = make_product(uuid);
                product.images = urls;
                Ok(product)
            });

        let uploads = UploadStore::new(dir.path().to_path_buf(), "http://example.com");

        let mut res = multipart(
            TestClient::put(format!("http://example.com/products/{uuid}/gallery-images")),
            &[("images", "image/png"), ("images", "image/jpeg")],
        )
        .send(&make_service(products, uploads))
        .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.images.len(), 2);
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_gallery_rejects_more_than_ten_files() -> TestResult {
        let dir = tempfile::tempdir()?;
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(move |_| Ok(make_product(uuid)));

        products.expect_set_product_images().never();

        let uploads = UploadStore::new(dir.path().to_path_buf(), "http://example.com");
        let parts = vec![("images", "image/png"); MAX_GALLERY_IMAGES + 1];

        let res = multipart(
            TestClient::put(format!("http://example.com/products/{uuid}/gallery-images")),
            &parts,
        )
        .send(&make_service(products, uploads))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
