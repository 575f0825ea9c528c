//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every dependency answered, otherwise `degraded`
    pub status: String,

    /// `ok` or `unreachable`
    pub database: String,
}

/// Healthcheck Handler
///
/// Answers 503 while the database cannot be reached, so load balancers stop
/// routing to this instance.
#[endpoint(
    tags("health"),
    summary = "Health check",
    responses(
        (status_code = StatusCode::OK, description = "All dependencies reachable"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Err(error) = state.app.health.check_database().await {
        tracing::warn!("healthcheck failed: {error}");

        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return Ok(Json(HealthResponse {
            status: "degraded".to_string(),
            database: "unreachable".to_string(),
        }));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: "ok".to_string(),
    }))
}
