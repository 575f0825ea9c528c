//! User Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}

/// User Index Handler
#[endpoint(tags("users"), summary = "List Users", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}
