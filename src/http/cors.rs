//! CORS policy module
//!
//! The active policy is wildcard: every origin, method, and header is
//! allowed and credentials are permitted. The allowlist parsed from
//! `CORS_ORIGINS` is deliberately not consulted here; it is only
//! surfaced by the `/test` endpoint.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use hyper::Response;

use crate::logger;

/// Inject the CORS header pair into an outgoing response.
///
/// Applied uniformly to every response the server produces, including
/// error responses, so cross-origin clients can always read the body.
pub fn apply_cors_headers(response: &mut Response<Full<Bytes>>) {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

/// Build the preflight response for OPTIONS requests.
///
/// Any OPTIONS request is treated as a preflight regardless of path.
/// The allow-origin/credentials pair is added by `apply_cors_headers`
/// together with all other responses.
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .header("Access-Control-Allow-Methods", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build preflight response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}
