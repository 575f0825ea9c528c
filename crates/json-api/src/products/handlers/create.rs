//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eshop_app::domain::products::{
    data::{NewProduct, ProductDetails},
    records::ProductUuid,
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Editable product fields
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsRequest {
    pub category_uuid: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub rich_description: String,
    #[serde(default)]
    pub brand: String,
    /// Price in cents
    pub price: u64,
    pub count_in_stock: u8,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: u32,
    #[serde(default)]
    pub is_featured: bool,
}

impl From<ProductDetailsRequest> for ProductDetails {
    fn from(request: ProductDetailsRequest) -> Self {
        ProductDetails {
            category_uuid: request.category_uuid.into(),
            name: request.name,
            description: request.description,
            rich_description: request.rich_description,
            brand: request.brand,
            price: request.price,
            count_in_stock: request.count_in_stock,
            rating: request.rating,
            num_reviews: request.num_reviews,
            is_featured: request.is_featured,
        }
    }
}

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Client-chosen UUID; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(flatten)]
    pub details: ProductDetailsRequest,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.map_or_else(ProductUuid::new, Into::into),
            details: request.details.into(),
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    tracing::Span::current().record("price", tracing::field::display(request.details.price));

    let product = state
        .app
        .products
        .create_product(request.into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("product_uuid", tracing::field::display(product.uuid));

    res.add_header(LOCATION, format!("/api/v1/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
