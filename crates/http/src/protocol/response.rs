//! HTTP response types produced by handlers and written by the connection.
//!
//! Responses use `http::Response` directly: its `HeaderMap` already gives
//! case-insensitive names, and `insert` replaces any previous value.

use bytes::Bytes;
use http::header::CONNECTION;
use http::{HeaderValue, StatusCode};

/// A response with a fully materialized body.
pub type Response = http::Response<Bytes>;

pub(crate) const KEEP_ALIVE: HeaderValue = HeaderValue::from_static("keep-alive");
pub(crate) const CLOSE: HeaderValue = HeaderValue::from_static("close");
pub(crate) const GZIP: HeaderValue = HeaderValue::from_static("gzip");

/// Builds an empty-bodied response that tells the client the connection is
/// about to close.
pub(crate) fn build_closing_response(status_code: StatusCode) -> Response {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status_code;
    response.headers_mut().insert(CONNECTION, CLOSE);
    response
}
