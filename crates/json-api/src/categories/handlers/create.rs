//! Create Category Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eshop_app::domain::categories::{data::NewCategory, records::CategoryUuid};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    state::State,
};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    /// Client-chosen UUID; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        NewCategory {
            uuid: request.uuid.map_or_else(CategoryUuid::new, Into::into),
            name: request.name,
            icon: request.icon,
            color: request.color,
        }
    }
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "categories.create",
    skip(json, depot, res),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("category_uuid", tracing::field::display(category.uuid));

    res.add_header(
        LOCATION,
        format!("/api/v1/categories/{}", category.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}
