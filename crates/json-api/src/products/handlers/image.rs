//! Product Image Upload Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

const FIELD: &str = "image";

/// Product Image Upload Handler
///
/// Accepts a multipart form with a single png or jpeg file in the `image`
/// field and makes it the product's main image.
#[endpoint(
    tags("products"),
    summary = "Upload Product Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Image stored"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or unsupported file"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.image",
    skip(product, req, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    state
        .app
        .products
        .get_product(product.into())
        .await
        .map_err(into_status_error)?;

    let part = req
        .file(FIELD)
        .await
        .ok_or_else(|| StatusError::bad_request().brief("No image in the request"))?;

    let url = state.uploads.save(FIELD, part).await?;

    let product = state
        .app
        .products
        .set_product_image(product.into(), url)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
