//! Prometheus metrics and the `/metrics` endpoint.
//!
//! Every label value is drawn from a closed set: route patterns, standard
//! methods, status codes and the order/webhook enums below.

use std::{sync::LazyLock, time::Duration};

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use salvo::{
    Request, Response, handler,
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::error;

use eshop_app::domain::orders::OrderStatus;

const NAMESPACE: &str = "eshop_json";

const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// How a Stripe webhook delivery was dealt with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WebhookOutcome {
    Handled,
    Ignored,
    Rejected,
}

impl WebhookOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Handled => "handled",
            Self::Ignored => "ignored",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    order_status_changes_total: IntCounterVec,
    stripe_webhooks_total: IntCounterVec,
}

static METRICS: LazyLock<Option<Metrics>> = LazyLock::new(|| {
    Metrics::register()
        .inspect_err(|source| error!("failed to register metrics: {source}"))
        .ok()
});

impl Metrics {
    fn register() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some(NAMESPACE.to_owned()), None)?;

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests by method, route and status."),
            &["method", "route", "status"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency by method and route.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        )?;

        let requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served.")?;

        let order_status_changes_total = IntCounterVec::new(
            Opts::new("order_status_changes_total", "Order status changes by new status."),
            &["status"],
        )?;

        let stripe_webhooks_total = IntCounterVec::new(
            Opts::new("stripe_webhooks_total", "Stripe webhook deliveries by outcome."),
            &["outcome"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(requests_in_flight.clone()))?;
        registry.register(Box::new(order_status_changes_total.clone()))?;
        registry.register(Box::new(stripe_webhooks_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            order_status_changes_total,
            stripe_webhooks_total,
        })
    }

    fn encode(&self) -> Result<String, prometheus::Error> {
        let mut encoded = String::new();

        TextEncoder::new().encode_utf8(&self.registry.gather(), &mut encoded)?;

        Ok(encoded)
    }
}

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlight(Option<&'static Metrics>);

impl InFlight {
    pub(super) fn start() -> Self {
        let metrics = METRICS.as_ref();

        if let Some(metrics) = metrics {
            metrics.requests_in_flight.inc();
        }

        Self(metrics)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(metrics) = self.0 {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(
    method: &'static str,
    route: &'static str,
    status: StatusCode,
    elapsed: Duration,
) {
    let Some(metrics) = METRICS.as_ref() else {
        return;
    };

    metrics
        .requests_total
        .with_label_values(&[method, route, status.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(elapsed.as_secs_f64());
}

/// Record an order entering `status`.
pub(crate) fn record_order_status(status: OrderStatus) {
    if let Some(metrics) = METRICS.as_ref() {
        metrics
            .order_status_changes_total
            .with_label_values(&[status.as_str()])
            .inc();
    }
}

pub(crate) fn record_stripe_webhook(outcome: WebhookOutcome) {
    if let Some(metrics) = METRICS.as_ref() {
        metrics
            .stripe_webhooks_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = METRICS.as_ref() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        return;
    };

    match metrics.encode() {
        Ok(body) => {
            if let Err(source) = res.add_header(CONTENT_TYPE, prometheus::TEXT_FORMAT, true) {
                error!("failed to set metrics content type: {source}");
            }

            res.render(body);
        }
        Err(source) => {
            error!("failed to encode metrics: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
