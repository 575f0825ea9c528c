//! Order Count Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCountResponse {
    pub count: u64,
}

/// Order Count Handler
#[endpoint(tags("orders"), summary = "Count Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let count = state
        .app
        .orders
        .count_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderCountResponse { count }))
}
