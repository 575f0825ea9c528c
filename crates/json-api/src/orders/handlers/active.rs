//! Active Order Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Active Order Handler
///
/// The caller's order that is still open for editing.
#[endpoint(
    tags("orders"),
    summary = "Get Active Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active order found"),
        (status_code = StatusCode::NOT_FOUND, description = "No open order"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let order = state
        .app
        .orders
        .get_active_order(identity.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
