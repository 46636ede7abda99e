//! HTTP protocol layer module
//!
//! Cross-cutting HTTP concerns, decoupled from the endpoint handlers.

pub mod cors;

pub use cors::{apply_cors_headers, build_preflight_response};
