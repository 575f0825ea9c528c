//! Logs, traces and Prometheus metrics for the shop API.

use thiserror::Error;

mod init;
mod logging;
mod metrics;
mod otel;
mod request;
mod settings;

pub(crate) use init::Observability;
pub(crate) use metrics::{WebhookOutcome, metrics_handler, record_order_status, record_stripe_webhook};
pub(crate) use request::request_logging;

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to build OTLP exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to install tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
