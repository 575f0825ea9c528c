//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
///
/// Returns every category ordered by name.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
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
        .into_service(Caller::Anonymous, Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_categories_without_auth() -> TestResult {
        let first = make_category(CategoryUuid::new());
        let second = make_category(CategoryUuid::new());

        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .return_once(move || Ok(vec![first, second]));

        let mut res = TestClient::get("http://example.com/categories")
            .send(&make_service(categories))
            .await;

        let body: CategoriesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.categories.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .return_once(|| Err(CategoriesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
