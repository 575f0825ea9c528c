//! User Count Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, users::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserCountResponse {
    pub count: u64,
}

/// User Count Handler
#[endpoint(tags("users"), summary = "Count Users", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let count = state
        .app
        .users
        .count_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(UserCountResponse { count }))
}
