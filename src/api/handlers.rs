// Endpoint handlers module
//
// Every handler is a pure function of the immutable application state:
// no body reads, no query parameters, no I/O. Repeated calls over the
// same state produce byte-identical JSON.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::json_response;
use super::types::{CorsEcho, HealthStatus, RootStatus, USERS};
use crate::config::AppState;

/// Startup banner surfaced by the root endpoint.
pub const BANNER: &str = "ThreadBrain backend is running 🚀";

/// GET / - banner and liveness flag
pub fn root() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &RootStatus {
            message: BANNER,
            status: "healthy",
        },
    )
}

/// GET /users - the static user directory, in fixture order
pub fn users() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &USERS)
}

/// GET /health - liveness plus the deployment environment label
pub fn health(state: &AppState) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &HealthStatus {
            status: "healthy",
            environment: &state.config.environment,
        },
    )
}

/// GET /test - echoes the configured origin allowlist so a browser
/// client can verify its cross-origin setup end to end
pub fn cors_test(state: &AppState) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &CorsEcho {
            message: "CORS is working!",
            origins: &state.config.cors.allowed_origins,
        },
    )
}
