//! Per-request span, access log and HTTP metrics.

mod labels;
mod parent_context;
mod request_ids;

use std::time::{Duration, Instant};

use salvo::{handler, http::StatusCode, prelude::*};
use tracing::{Instrument as _, error, field::Empty, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const METRICS_ROUTE: &str = "/metrics";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let route = labels::route_label(req.uri().path());

    if route == METRICS_ROUTE {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let method = labels::method_label(req.method());
    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    request_ids::echo_request_id(res, &request_id);

    let span_name = format!("{method} {route}");
    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %span_name,
        otel.kind = "server",
        http.route = route,
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        remote_addr = %req.remote_addr(),
        status = Empty,
        duration_ms = Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    let in_flight = metrics::InFlight::start();

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    drop(in_flight);

    let status = res.status_code.unwrap_or(StatusCode::OK);
    let elapsed = started.elapsed();

    metrics::observe_request(method, route, status, elapsed);

    span.record("status", status.as_u16());
    span.record("duration_ms", elapsed.as_millis());
    span.in_scope(|| log_completion(status, elapsed));
}

fn log_completion(status: StatusCode, elapsed: Duration) {
    let status_code = status.as_u16();
    let duration_ms = elapsed.as_millis();

    if status.is_server_error() {
        error!(status = status_code, duration_ms, "request failed");
    } else if status.is_client_error() {
        warn!(status = status_code, duration_ms, "request rejected");
    } else {
        info!(status = status_code, duration_ms, "request completed");
    }

    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    if duration_ms > threshold_ms {
        warn!(duration_ms, threshold_ms, "slow request");
    }
}
