// Configuration module entry point
// Loads the immutable startup configuration and owns the shared state

mod state;
mod types;

use std::env;
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    parse_origins, Config, CorsConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    DEFAULT_ORIGIN,
};

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Server/logging/performance sections use `TB_*` overrides with
    /// `__` as the section separator (e.g. `TB_SERVER__PORT=9000`);
    /// `CORS_ORIGINS` and `ENVIRONMENT` are read under their own names.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("TB").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.cors = CorsConfig::from_env();
        cfg.environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "unknown".to_string());
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(host: &str, port: u16) -> Config {
        Config {
            server: ServerConfig {
                host: host.to_string(),
                port,
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
            cors: CorsConfig::default(),
            environment: "unknown".to_string(),
        }
    }

    #[test]
    fn test_parse_origins_splits_on_commas() {
        assert_eq!(
            parse_origins("https://a.com,https://b.com"),
            vec!["https://a.com", "https://b.com"]
        );
    }

    #[test]
    fn test_parse_origins_trims_whitespace() {
        assert_eq!(
            parse_origins(" https://a.com , https://b.com "),
            vec!["https://a.com", "https://b.com"]
        );
    }

    #[test]
    fn test_parse_origins_single_value() {
        assert_eq!(parse_origins(DEFAULT_ORIGIN), vec![DEFAULT_ORIGIN]);
    }

    #[test]
    fn test_parse_origins_drops_empty_entries() {
        assert_eq!(parse_origins("https://a.com,,"), vec!["https://a.com"]);
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_socket_addr_valid() {
        let cfg = make_config("127.0.0.1", 8000);
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "127.0.0.1:8000");
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let cfg = make_config("not a host", 8000);
        assert!(cfg.socket_addr().is_err());
    }
}
