//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eshop_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns a list of products, optionally limited to a comma separated list
/// of category UUIDs.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    categories: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        categories: parse_categories(categories.into_inner().as_deref())?,
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

fn parse_categories<T>(value: Option<&str>) -> Result<Vec<T>, StatusError>
where
    T: From<Uuid>,
{
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| Uuid::parse_str(segment).map(T::from))
        .collect::<Result<Vec<_>, _>>()
        .or_400("could not parse \"categories\" query parameter")
}
