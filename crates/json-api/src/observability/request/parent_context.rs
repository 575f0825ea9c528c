//! W3C `traceparent` extraction for request spans.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

/// The caller's trace context, if the request carried a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| extract_with(propagator, headers))
}

fn extract_with(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    // A fresh base keeps requests without trace headers from joining
    // whatever span happens to be active in-process.
    let context = propagator.extract_with_context(&Context::new(), &RequestHeaders(headers));

    let is_valid = context.span().span_context().is_valid();

    is_valid.then_some(context)
}

struct RequestHeaders<'a>(&'a HeaderMap);

impl Extractor for RequestHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
