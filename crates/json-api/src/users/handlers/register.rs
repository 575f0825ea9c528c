//! Register User Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use eshop_app::domain::users::{data::NewUser, records::UserUuid};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

/// Profile fields accepted when an account is created.
#[derive(Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub uuid: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub apartment: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl RegisterRequest {
    pub(crate) fn into_new_user(self, is_admin: bool) -> NewUser {
        NewUser {
            uuid: self.uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            name: self.name,
            email: self.email,
            password: self.password,
            phone: self.phone,
            is_admin,
            street: self.street,
            apartment: self.apartment,
            zip: self.zip,
            city: self.city,
            country: self.country,
        }
    }
}

/// Register User Handler
///
/// Self-service sign up. Accounts created here are never admins.
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
    ),
)]
#[tracing::instrument(
    name = "users.register",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_user = json.into_inner().into_new_user(false);

    tracing::Span::current().record("user_uuid", tracing::field::display(new_user.uuid));

    let user = state
        .app
        .users
        .create_user(new_user)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/v1/users/{}", user.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(user_uuid = %user.uuid, "registered user");

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use eshop_app::{
        auth::PasswordError,
        domain::users::{MockUsersService, UsersServiceError},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Caller, MockServices, make_user};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        MockServices {
            users,
            ..MockServices::strict()
        }
        .into_service(Caller::Anonymous, Router::with_path("users/register").post(handler))
    }

    #[tokio::test]
    async fn test_register_creates_shopper() -> TestResult {
        let uuid = UserUuid::new();

        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .withf(move |user| {
                user.uuid == uuid
                    && !user.is_admin
                    && user.email == "ada@example.com"
                    && user.password == "hunter22"
            })
            .return_once(|user| Ok(make_user(user.uuid)));

        let mut res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Ada",
                "email": "ada@example.com",
                "password": "hunter22",
            }))
            .send(&make_service(users))
            .await;

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/v1/users/{uuid}")));
        assert!(!body.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_ignores_admin_flag() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .withf(|user| !user.is_admin)
            .return_once(|user| Ok(make_user(user.uuid)));

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "name": "Mallory",
                "email": "mallory@example.com",
                "password": "hunter22",
                "is_admin": true,
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "hunter22",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_empty_password_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::Password(PasswordError::Empty)));

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_missing_email_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({ "name": "Ada", "password": "hunter22" }))
            .send(&make_service(MockUsersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
