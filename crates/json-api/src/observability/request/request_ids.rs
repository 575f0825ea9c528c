//! `x-request-id` resolution.

use salvo::{http::header::HeaderValue, prelude::Response};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's id when it is a short token of visible ASCII;
/// otherwise mint a UUIDv7.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn echo_request_id(res: &mut Response, request_id: &str) {
    // Resolved ids are visible ASCII, so this only fails on a logic error.
    if let Ok(value) = HeaderValue::from_str(request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b':'))
}
