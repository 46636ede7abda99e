// Application state module

use super::types::Config;

/// Immutable state shared by all request handlers.
///
/// Constructed once in `main` from the loaded configuration and passed
/// explicitly behind an `Arc`; nothing reads the environment after
/// startup.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Whether access logging is enabled.
    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
