//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Delete Category Handler
///
/// Products filed under the category are deleted with it.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Category products are referenced by orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "categories.delete",
    skip(category, depot),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner();

    tracing::Span::current().record("category_uuid", tracing::field::display(category));

    state
        .app
        .categories
        .delete_category(category.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(category_uuid = %category, "deleted category");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use eshop_app::domain::categories::{
        CategoriesServiceError, MockCategoriesService, records::CategoryUuid,
    };

    use crate::test_helpers::{Caller, MockServices};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        MockServices {
            categories,
            ..MockServices::strict()
        }
        .into_service(
            Caller::Admin,
            Router::with_path("categories/{category}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_category_success() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_referenced_category_returns_409() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::InvalidReference));

        let res = TestClient::delete(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
