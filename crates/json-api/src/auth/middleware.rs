//! Auth middleware.

use std::sync::Arc;

use eshop_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

/// Resolve the bearer token into an [`Identity`](eshop_app::auth::Identity)
/// stored on the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let identity = match state.app.auth.authenticate_bearer(token).await {
        Ok(identity) => identity,
        Err(AuthServiceError::NotFound | AuthServiceError::InvalidCredentials) => {
            res.render(StatusError::unauthorized().brief("Invalid session token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate session token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_identity(identity);

    ctrl.call_next(req, depot, res).await;
}

/// Reject callers that are not administrators. Must run after [`handler`].
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Err(error) = depot.admin_or_403() {
        res.render(error);
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
