//! Login Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, users::errors::into_auth_status_error};

#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// A freshly issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    pub user: String,
    pub token: String,
    pub is_admin: bool,
    pub expires_at: String,
}

/// Login Handler
///
/// Exchanges email and password for a bearer token.
#[endpoint(
    tags("users"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
    ),
)]
#[tracing::instrument(name = "users.login", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_auth_status_error)?;

    tracing::info!(
        user_uuid = %session.metadata.user_uuid,
        session_uuid = %session.metadata.uuid,
        "issued session"
    );

    Ok(Json(LoginResponse {
        user: session.email,
        token: session.token,
        is_admin: session.is_admin,
        expires_at: session.metadata.expires_at.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use eshop_app::auth::{
        AuthServiceError, IssuedSession, MockAuthService, SessionTokenMetadata,
        SessionTokenVersion,
    };

    use crate::test_helpers::{Caller, MockServices, TEST_SESSION_UUID, TEST_USER_UUID};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        MockServices {
            auth,
            ..MockServices::strict()
        }
        .into_service(Caller::Anonymous, Router::with_path("users/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login().once().return_once(|_, _| {
            Ok(IssuedSession {
                token: "es_v1_token".to_string(),
                email: "ada@example.com".to_string(),
                is_admin: false,
                metadata: SessionTokenMetadata {
                    uuid: TEST_SESSION_UUID,
                    user_uuid: TEST_USER_UUID,
                    version: SessionTokenVersion::V1,
                    created_at: Timestamp::UNIX_EPOCH,
                    last_used_at: None,
                    expires_at: Timestamp::UNIX_EPOCH,
                    revoked_at: None,
                },
            })
        });

        let mut res = TestClient::post("http://example.com/users/login")
            .json(&json!({ "email": "ada@example.com", "password": "hunter22" }))
            .send(&make_service(auth))
            .await;

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.user, "ada@example.com");
        assert_eq!(body.token, "es_v1_token");
        assert!(!body.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn test_login_bad_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/users/login")
            .json(&json!({ "email": "ada@example.com", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let request = LoginRequest {
            email: "ada@example.com".to_string(),
            password: "hunter22".to_string(),
        };

        assert!(!format!("{request:?}").contains("hunter22"));
    }
}
