//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eshop_app::domain::products::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The category the product is filed under
    pub category_uuid: Uuid,

    pub name: String,

    pub description: String,

    pub rich_description: String,

    /// Public URL of the main image
    pub image: String,

    /// Public URLs of the gallery images
    pub images: Vec<String>,

    pub brand: String,

    /// The price of the product in cents
    pub price: u64,

    pub count_in_stock: u8,

    pub rating: f64,

    pub num_reviews: u32,

    pub is_featured: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            category_uuid: product.category_uuid.into(),
            name: product.name,
            description: product.description,
            rich_description: product.rich_description,
            image: product.image,
            images: product.images,
            brand: product.brand,
            price: product.price,
            count_in_stock: product.count_in_stock,
            rating: product.rating,
            num_reviews: product.num_reviews,
            is_featured: product.is_featured,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
