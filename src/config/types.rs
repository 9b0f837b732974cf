// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub page: PageConfig,
    pub library: LibraryConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Hosting page configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PageConfig {
    /// Page URL or query string carrying `libraryUrl`
    #[serde(default)]
    pub location: Option<String>,
}

/// Remote library client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    /// Seconds before a remote fetch is abandoned, no limit when unset
    #[serde(default)]
    pub fetch_timeout: Option<u64>,
    pub user_agent: String,
}

/// Message relay configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RelayConfig {
    /// Origins allowed to post messages, empty accepts any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    pub fn origin_allowed(&self, origin: Option<&str>) -> bool {
        if self.allowed_origins.is_empty() {
            return true;
        }
        origin.is_some_and(|o| self.allowed_origins.iter().any(|allowed| allowed == o))
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Exchange log format (combined, common, json, or custom pattern)
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

/// HTTP transport configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Transport routes configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Path accepting posted request envelopes
    #[serde(default = "default_message_path")]
    pub message_path: String,
    /// Liveness probe path
    pub health_path: String,
    /// Serve virtual paths to plain HTTP GETs
    pub direct_get: bool,
}

impl RoutesConfig {
    /// Methods the transport accepts, as listed in `Allow`
    pub const fn allowed_methods(&self) -> &'static str {
        if self.direct_get {
            "GET, HEAD, POST, OPTIONS"
        } else {
            "POST, OPTIONS"
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_message_path() -> String {
    "/message".to_string()
}
