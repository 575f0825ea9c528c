//! Tracing subscriber assembly.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies that are chatty at `info` and below.
const QUIET_TARGETS: &[&str] = &[
    "h2", "hyper", "reqwest", "rustls", "sqlx", "tonic", "tower", "opentelemetry",
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.observability.otel_service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(format_layer(config.logging.log_format))
        .with(otel_layer)
        .with(env_filter(&config.logging.log_level))
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    }
}

/// `RUST_LOG` wins when set; otherwise `level` with dependencies capped at `warn`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    std::iter::once(level.to_owned())
        .chain(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_cap_dependencies_at_warn() {
        let directives = default_directives("debug");

        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("sqlx=warn"));
        assert!(directives.contains("reqwest=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
