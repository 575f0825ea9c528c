//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Delete User Handler
///
/// The user's sessions and orders are deleted with them.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.delete",
    skip(user, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    state
        .app
        .users
        .delete_user(user.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user, "deleted user");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use eshop_app::domain::users::{MockUsersService, UsersServiceError, records::UserUuid};

    use crate::test_helpers::{Caller, MockServices};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        MockServices {
            users,
            ..MockServices::strict()
        }
        .into_service(Caller::Admin, Router::with_path("users/{user}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_user_success() -> TestResult {
        let uuid = UserUuid::new();

        let mut users = MockUsersService::new();

        users
            .expect_delete_user()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/users/{uuid}"))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_delete_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/users/{}", UserUuid::new()))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
