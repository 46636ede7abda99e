// API module entry
// Request dispatch for the four public endpoints

mod handlers;
mod response;
mod types;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};

use crate::config::AppState;
use crate::http::{apply_cors_headers, build_preflight_response};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling.
///
/// Extracts what the access log needs, resolves the route, injects the
/// CORS header pair, and logs the outcome. Request bodies are never
/// read.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let http_version = version_label(req.version());
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let mut response = respond(&method, uri.path(), &state);
    apply_cors_headers(&mut response);

    if state.access_log() {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = http_version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_size(&response);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve a (method, path) pair to a response.
///
/// Routes are matched exactly; OPTIONS short-circuits to the CORS
/// preflight for any path. CORS headers are injected by the caller.
pub fn respond(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    match *method {
        Method::OPTIONS => build_preflight_response(),
        Method::GET | Method::HEAD => match path {
            "/" => handlers::root(),
            "/users" => handlers::users(),
            "/health" => handlers::health(state),
            "/test" => handlers::cors_test(state),
            _ => response::not_found(),
        },
        _ => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            response::method_not_allowed()
        }
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn body_size(response: &Response<Full<Bytes>>) -> usize {
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        Config, CorsConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    };
    use http_body_util::BodyExt;

    fn make_state(origins: &[&str], environment: &str) -> Arc<AppState> {
        Arc::new(AppState::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            cors: CorsConfig {
                allowed_origins: origins.iter().map(ToString::to_string).collect(),
            },
            environment: environment.to_string(),
        }))
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get(path: &str, state: &Arc<AppState>) -> Response<Full<Bytes>> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap();
        let peer = "127.0.0.1:40000".parse().unwrap();
        handle_request(req, peer, Arc::clone(state)).await.unwrap()
    }

    #[tokio::test]
    async fn test_root_reports_healthy() {
        let state = make_state(&[], "unknown");
        let response = get("/", &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_users_returns_fixture() {
        let state = make_state(&[], "unknown");
        let body = body_json(get("/users", &state).await).await;

        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 2);
        for record in records {
            assert!(record["id"].as_u64().unwrap() > 0);
            assert!(!record["name"].as_str().unwrap().is_empty());
            assert!(record["email"].as_str().unwrap().contains('@'));
        }
        assert_ne!(records[0]["id"], records[1]["id"]);
    }

    #[tokio::test]
    async fn test_health_echoes_environment() {
        let state = make_state(&[], "staging");
        let body = body_json(get("/health", &state).await).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["environment"], "staging");
    }

    #[tokio::test]
    async fn test_health_defaults_to_unknown() {
        let state = make_state(&[], "unknown");
        let body = body_json(get("/health", &state).await).await;
        assert_eq!(body["environment"], "unknown");
    }

    #[tokio::test]
    async fn test_cors_test_echoes_configured_origins() {
        let state = make_state(&["https://a.com", "https://b.com"], "unknown");
        let response = get("/test", &state).await;
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            bytes,
            r#"{"message":"CORS is working!","origins":["https://a.com","https://b.com"]}"#
                .as_bytes()
        );
    }

    #[tokio::test]
    async fn test_every_response_carries_cors_headers() {
        let state = make_state(&["https://a.com"], "unknown");
        for path in ["/", "/users", "/health", "/test", "/missing"] {
            let response = get(path, &state).await;
            assert_eq!(
                response.headers().get("access-control-allow-origin").unwrap(),
                "*",
                "missing wildcard origin on {path}"
            );
            assert_eq!(
                response
                    .headers()
                    .get("access-control-allow-credentials")
                    .unwrap(),
                "true"
            );
        }
    }

    #[tokio::test]
    async fn test_options_is_preflight_on_any_path() {
        let state = make_state(&["https://a.com"], "unknown");
        for path in ["/", "/users", "/missing"] {
            let req = Request::builder()
                .method(Method::OPTIONS)
                .uri(path)
                .body(Full::new(Bytes::new()))
                .unwrap();
            let peer = "127.0.0.1:40000".parse().unwrap();
            let response = handle_request(req, peer, Arc::clone(&state)).await.unwrap();

            assert_eq!(response.status(), 204);
            // Wildcard policy applies regardless of the configured allowlist
            assert_eq!(
                response.headers().get("access-control-allow-origin").unwrap(),
                "*"
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = make_state(&[], "unknown");
        let response = get("/nope", &state).await;
        assert_eq!(response.status(), 404);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Not Found");
        assert!(body["available_endpoints"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("/users")));
    }

    #[tokio::test]
    async fn test_wrong_method_is_405_with_allow_header() {
        let state = make_state(&[], "unknown");
        let req = Request::builder()
            .method(Method::POST)
            .uri("/users")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let peer = "127.0.0.1:40000".parse().unwrap();
        let response = handle_request(req, peer, state).await.unwrap();

        assert_eq!(response.status(), 405);
        assert_eq!(response.headers().get("allow").unwrap(), "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn test_repeated_calls_are_byte_identical() {
        let state = make_state(&["https://a.com"], "staging");
        for path in ["/", "/users", "/health", "/test"] {
            let first = get(path, &state).await.into_body().collect().await.unwrap();
            let second = get(path, &state).await.into_body().collect().await.unwrap();
            assert_eq!(first.to_bytes(), second.to_bytes(), "drift on {path}");
        }
    }
}
