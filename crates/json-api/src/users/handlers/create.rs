//! Create User Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse, register::RegisterRequest},
};

#[derive(Deserialize, ToSchema)]
pub(crate) struct CreateUserRequest {
    #[serde(default)]
    pub is_admin: bool,
    #[serde(flatten)]
    pub profile: RegisterRequest,
}

/// Create User Handler
///
/// Admin-only variant of registration that may grant the admin flag.
#[endpoint(
    tags("users"),
    summary = "Create User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
    ),
)]
#[tracing::instrument(
    name = "users.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, is_admin = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let new_user = request.profile.into_new_user(request.is_admin);

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(new_user.uuid));
    span.record("is_admin", new_user.is_admin);

    let user = state
        .app
        .users
        .create_user(new_user)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/v1/users/{}", user.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(user_uuid = %user.uuid, "created user");

    Ok(Json(user.into()))
}
