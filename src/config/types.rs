// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HEADER_READ_TIMEOUT: u32 = 30;
/// 0 disables the whole-connection ceiling
pub const DEFAULT_CONNECTION_TIMEOUT: u32 = 0;
pub const DEFAULT_SERVER_NAME: &str = "http-reflector";
pub const DEFAULT_MAX_BODY_SIZE: u32 = 16 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Verbose mode: request headers and parse failures are logged in detail
    #[serde(default)]
    pub debug: bool,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
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
    pub level: String,
    pub access_log: bool,
    /// Access log format (werkzeug, common or json)
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
    "werkzeug".to_string()
}

/// Connection-level tuning
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds allowed for a client to send its request headers
    pub header_read_timeout: u64,
    /// Upper bound on a whole connection in seconds, 0 (the default) disables it
    pub connection_timeout: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
                access_log_format: default_access_log_format(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive: true,
                header_read_timeout: u64::from(DEFAULT_HEADER_READ_TIMEOUT),
                connection_timeout: u64::from(DEFAULT_CONNECTION_TIMEOUT),
            },
            http: HttpConfig {
                server_name: DEFAULT_SERVER_NAME.to_string(),
                max_body_size: u64::from(DEFAULT_MAX_BODY_SIZE),
            },
        }
    }
}
