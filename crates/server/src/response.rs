//! Response builders shared by the book handlers.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Indented JSON body with `status`.
///
/// Failing to encode our own data is a process fault, not a client error: the
/// request is aborted instead of answered.
pub fn json_pretty<T: Serialize>(status: StatusCode, value: &T) -> Response {
    let body = match serde_json::to_vec_pretty(value) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "failed to encode response body");
            panic!("response encoding failed: {e}");
        }
    };
    (status, [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))], body).into_response()
}

/// Body-less response that still advertises the JSON content type.
pub fn empty(status: StatusCode) -> Response {
    (status, [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))]).into_response()
}

/// `201 Created` pointing at `location`.
pub fn created(location: &str) -> Response {
    let mut res = empty(StatusCode::CREATED);
    match HeaderValue::from_str(location) {
        Ok(v) => {
            res.headers_mut().insert(header::LOCATION, v);
        }
        Err(e) => warn!(%location, error = %e, "location is not a valid header value; omitted"),
    }
    res
}
