//! Get Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eshop_app::domain::categories::records::CategoryRecord;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The unique identifier of the category
    pub uuid: Uuid,

    pub name: String,

    /// Icon name shown next to the category
    pub icon: Option<String>,

    /// Display color, usually a hex string
    pub color: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        CategoryResponse {
            uuid: category.uuid.into(),
            name: category.name,
            icon: category.icon,
            color: category.color,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

/// Get Category Handler
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(category.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use eshop_app::domain::categories::{
        CategoriesServiceError, MockCategoriesService, records::CategoryUuid,
    };

    use crate::test_helpers::{Caller, MockServices, make_category};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        MockServices {
            categories,
            ..MockServices::strict()
        }
        .into_service(
            Caller::Anonymous,
            Router::with_path("categories/{category}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_category() -> TestResult {
        let uuid = CategoryUuid::new();
        let category = make_category(uuid);

        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(category));

        let mut res = TestClient::get(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.name, "Phones");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_category_returns_404() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_uuid_returns_400() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories.expect_get_category().never();

        let res = TestClient::get("http://example.com/categories/not-a-uuid")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
