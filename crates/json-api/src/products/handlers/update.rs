//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use eshop_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{create::ProductDetailsRequest, errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product Update Handler
///
/// Replaces every descriptive field. Images are changed through the upload
/// endpoints.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(
        product_uuid = tracing::field::Empty,
        price = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductDetailsRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));
    span.record("price", tracing::field::display(request.price));

    let product = state
        .app
        .products
        .update_product(
            product.into(),
            ProductUpdate {
                details: request.into(),
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
