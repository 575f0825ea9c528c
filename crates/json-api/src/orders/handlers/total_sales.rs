//! Total Sales Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalSalesResponse {
    pub total_sales: u64,
}

/// Total Sales Handler
///
/// Sum of order totals, excluding cancelled orders, in minor units.
#[endpoint(tags("orders"), summary = "Total Sales", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TotalSalesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let total_sales = state
        .app
        .orders
        .total_sales()
        .await
        .map_err(into_status_error)?;

    Ok(Json(TotalSalesResponse { total_sales }))
}
