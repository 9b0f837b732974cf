// Configuration module entry point
// Manages relay configuration and the runtime state built from it

mod state;
mod types;

use std::net::SocketAddr;

use crate::catalog::page;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LibraryConfig, LoggingConfig, PageConfig, PerformanceConfig,
    RelayConfig, RoutesConfig, ServerConfig,
};

/// Default config file (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Environment variables prefixed with `RELAY_` override the file, with
    /// `__` separating section and key (`RELAY_PAGE__LOCATION`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("RELAY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("library.user_agent", concat!("tiddler-relay/", env!("CARGO_PKG_VERSION")))?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "tiddler-relay")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("routes.health_path", "/healthz")?
            .set_default("routes.direct_get", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Remote library base URL read from the page location
    pub fn library_url(&self) -> Option<String> {
        page::library_url(self.page.location.as_deref())
    }
}
