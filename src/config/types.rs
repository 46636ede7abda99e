// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::env;

/// Main configuration structure
///
/// Built once at startup and never mutated afterwards. The
/// server/logging/performance sections come through the `config` crate
/// (defaults plus `TB_*` environment overrides); the two application
/// variables `CORS_ORIGINS` and `ENVIRONMENT` keep their exact names
/// and are read directly.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(skip)]
    pub cors: CorsConfig,
    #[serde(skip)]
    pub environment: String,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// CORS origin allowlist parsed from `CORS_ORIGINS`.
///
/// The list is only echoed back by the `/test` endpoint; the active
/// response policy stays wildcard (see `http::cors`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Fallback origin when `CORS_ORIGINS` is unset.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

impl CorsConfig {
    /// Read the allowlist from the process environment.
    pub fn from_env() -> Self {
        let raw = env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        Self {
            allowed_origins: parse_origins(&raw),
        }
    }
}

/// Split a comma-separated origin list into its entries.
///
/// Entries are trimmed and empty entries dropped; no further validation
/// happens. A value without commas becomes a single-element list.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
