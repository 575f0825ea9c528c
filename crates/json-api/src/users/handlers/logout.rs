//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, users::errors::into_auth_status_error};

/// Logout Handler
///
/// Revokes the session the request was authenticated with.
#[endpoint(
    tags("users"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
#[tracing::instrument(
    name = "users.logout",
    skip(depot),
    fields(session_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    tracing::Span::current().record(
        "session_uuid",
        tracing::field::display(identity.session_uuid),
    );

    state
        .app
        .auth
        .logout(identity.session_uuid)
        .await
        .map_err(into_auth_status_error)?;

    Ok(StatusCode::OK)
}
