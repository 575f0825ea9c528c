//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eshop_app::domain::categories::data::CategoryUpdate;

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    state::State,
};

/// Update Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(request: UpdateCategoryRequest) -> Self {
        CategoryUpdate {
            name: request.name,
            icon: request.icon,
            color: request.color,
        }
    }
}

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "categories.update",
    skip(category, json, depot),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner();

    tracing::Span::current().record("category_uuid", tracing::field::display(category));

    let category = state
        .app
        .categories
        .update_category(category.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}
