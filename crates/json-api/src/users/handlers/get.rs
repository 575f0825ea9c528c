//! Get User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eshop_app::domain::users::records::{UserRecord, UserUuid};

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// A user without credentials.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub street: String,
    pub apartment: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            is_admin: user.is_admin,
            street: user.street,
            apartment: user.apartment,
            zip: user.zip,
            city: user.city,
            country: user.country,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Get User Handler
///
/// Shoppers may only read their own profile.
#[endpoint(
    tags("users"),
    summary = "Get User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User found"),
        (status_code = StatusCode::FORBIDDEN, description = "Another user's profile"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let user = UserUuid::from_uuid(user.into_inner());

    if !identity.is_admin && identity.user_uuid != user {
        return Err(StatusError::forbidden());
    }

    let user = state
        .app
        .users
        .get_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
