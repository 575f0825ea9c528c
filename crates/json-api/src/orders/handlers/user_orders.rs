//! User Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use eshop_app::domain::users::records::UserUuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// User Orders Handler
///
/// A user's order history as a bare array. Shoppers may only list their own.
#[endpoint(
    tags("orders"),
    summary = "List User Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders listed"),
        (status_code = StatusCode::FORBIDDEN, description = "Another user's orders"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let user = UserUuid::from_uuid(user.into_inner());

    if !identity.is_admin && identity.user_uuid != user {
        return Err(StatusError::forbidden());
    }

    let orders = state
        .app
        .orders
        .list_user_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
